//! 三目並べサーバーのエントリポイント
//! 設定読み込み、ログ初期化、HTTPサーバー起動を行う。

use std::{sync::Arc, time::Duration};

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tictactoe::{
    api::{handlers::AppState, routes::create_router},
    cli::Cli,
    config::Config,
    session::GameSessionManager,
};

const DEFAULT_CONFIG_PATH: &str = "config.json";

fn load_config(cli: &Cli) -> Result<Config, tictactoe::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env()?;
            config
        }
        None => Config::load()?,
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

/// RUST_LOGが設定されていればそれを優先する
fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

/// 無操作のゲームを定期的に削除するタスクを起動する
fn spawn_cleanup_task(sessions: Arc<GameSessionManager>, interval_minutes: u64) {
    tokio::spawn(async move {
        let period = Duration::from_secs(interval_minutes.saturating_mul(60));
        let mut interval = tokio::time::interval(period);
        interval.tick().await;
        loop {
            interval.tick().await;
            sessions.cleanup_inactive_sessions();
        }
    });
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.generate_config {
        if let Err(e) = Config::default().save_to_file(DEFAULT_CONFIG_PATH) {
            eprintln!("設定ファイル生成失敗: {}", e);
            std::process::exit(1);
        }
        println!("デフォルト設定を {} に書き出しました", DEFAULT_CONFIG_PATH);
        return;
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("設定エラー: {}", e);
            eprintln!("デフォルト設定を生成: cargo run -- --generate-config");
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    info!(
        bind = %config.bind_address(),
        max_sessions = config.sessions.max_sessions,
        session_timeout_minutes = config.sessions.session_timeout_minutes,
        "configuration loaded"
    );

    let sessions = Arc::new(GameSessionManager::with_timeout(
        config.sessions.max_sessions,
        config.sessions.session_timeout_minutes,
    ));

    if config.sessions.enable_session_cleanup {
        spawn_cleanup_task(Arc::clone(&sessions), config.sessions.cleanup_interval_minutes);
    } else {
        warn!("session cleanup disabled; idle games are kept until deleted");
    }

    let app = create_router(AppState::with_session_manager(sessions), &config.server);

    let bind_address = config.bind_address();
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%bind_address, error = %e, "failed to bind address");
            std::process::exit(1);
        }
    };

    info!("tic-tac-toe server listening on http://{}", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server terminated");
        std::process::exit(1);
    }
}
