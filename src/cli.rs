//! コマンドライン引数の定義

use clap::Parser;
use std::path::PathBuf;

/// ブラウザで遊ぶ三目並べサーバー
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Browser tic-tac-toe with move history and time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// 設定ファイルのパス（省略時は既定の場所を探索）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// デフォルト設定をconfig.jsonに書き出して終了する
    #[arg(long)]
    pub generate_config: bool,

    /// 待ち受けポート（設定ファイルと環境変数より優先）
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["tictactoe"]);
        assert!(cli.config.is_none());
        assert!(!cli.generate_config);
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["tictactoe", "--config", "app.json", "--port", "8080"]);
        assert_eq!(cli.config, Some(PathBuf::from("app.json")));
        assert_eq!(cli.port, Some(8080));

        let cli = Cli::parse_from(["tictactoe", "--generate-config"]);
        assert!(cli.generate_config);
    }
}
