//! アプリケーション設定管理モジュール
//! サーバー、セッション、ログの設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

/// 設定ファイルの探索順
const CONFIG_SEARCH_PATHS: [&str; 3] = [
    "config.json",
    "config/app.json",
    "/etc/tictactoe/config.json",
];

/// タイムアウトと掃除間隔に指定できる上限（分）
/// 1年を超える値は時刻計算のオーバーフローを招くため受け付けない
pub const MAX_DURATION_MINUTES: i64 = 60 * 24 * 365;

/// サーバーの設定を管理する構造体
/// ポート番号、ホスト名、CORS設定などを含む
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub enable_cors: bool,
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
            enable_cors: true,
            enable_logging: true,
        }
    }
}

/// ゲームセッションの設定を管理する構造体
/// セッション数制限、タイムアウト、クリーンアップ設定など
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub max_sessions: usize,
    pub session_timeout_minutes: i64,
    pub enable_session_cleanup: bool,
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 100,
            session_timeout_minutes: 30,
            enable_session_cleanup: true,
            cleanup_interval_minutes: 5,
        }
    }
}

/// ログ出力の設定
/// RUST_LOGが設定されている場合はそちらが優先される
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub sessions: SessionConfig,
    pub logging: LoggingConfig,
}

/// 設定関連のエラーを表すenum
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

/// 環境変数を読み取り、存在すればパースして返す
fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarError {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// デフォルト値をベースに環境変数で上書きした設定を作る
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// 環境変数で設定値を上書きする
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(host) = parse_env::<String>("SERVER_HOST")? {
            self.server.host = host;
        }
        if let Some(port) = parse_env("SERVER_PORT")? {
            self.server.port = port;
        }
        if let Some(max_sessions) = parse_env("MAX_SESSIONS")? {
            self.sessions.max_sessions = max_sessions;
        }
        if let Some(timeout) = parse_env("SESSION_TIMEOUT_MINUTES")? {
            self.sessions.session_timeout_minutes = timeout;
        }
        if let Some(interval) = parse_env("SESSION_CLEANUP_INTERVAL_MINUTES")? {
            self.sessions.cleanup_interval_minutes = interval;
        }
        if let Some(level) = parse_env::<String>("LOG_LEVEL")? {
            self.logging.level = level;
        }
        Ok(())
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// 設定ファイルがなくてもデフォルト値で動作する
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = CONFIG_SEARCH_PATHS
            .iter()
            .find_map(|path| Self::from_file(path).ok())
            .unwrap_or_default();

        config.apply_env()?;
        Ok(config)
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: self.server.port.to_string(),
            });
        }

        if self.sessions.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sessions.max_sessions".to_string(),
                value: self.sessions.max_sessions.to_string(),
            });
        }

        if self.sessions.session_timeout_minutes <= 0
            || self.sessions.session_timeout_minutes > MAX_DURATION_MINUTES
        {
            return Err(ConfigError::InvalidValue {
                field: "sessions.session_timeout_minutes".to_string(),
                value: self.sessions.session_timeout_minutes.to_string(),
            });
        }

        let interval = self.sessions.cleanup_interval_minutes;
        if (self.sessions.enable_session_cleanup && interval == 0)
            || interval > MAX_DURATION_MINUTES as u64
        {
            return Err(ConfigError::InvalidValue {
                field: "sessions.cleanup_interval_minutes".to_string(),
                value: self.sessions.cleanup_interval_minutes.to_string(),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_cleanup_interval_only_when_enabled() {
        let mut config = Config::default();
        config.sessions.cleanup_interval_minutes = 0;
        assert!(config.validate().is_err());

        config.sessions.enable_session_cleanup = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_upper_bound() {
        let mut config = Config::default();
        config.sessions.session_timeout_minutes = MAX_DURATION_MINUTES;
        config.sessions.cleanup_interval_minutes = MAX_DURATION_MINUTES as u64;
        assert!(config.validate().is_ok());
    }
}
