//! 設定システム統合テスト

use std::fs;
use tempfile::TempDir;

use tictactoe::config::{
    Config, ConfigError, LoggingConfig, ServerConfig, SessionConfig, MAX_DURATION_MINUTES,
};

fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            port: 4000,
            host: "0.0.0.0".to_string(),
            enable_cors: false,
            enable_logging: false,
        },
        sessions: SessionConfig {
            max_sessions: 50,
            session_timeout_minutes: 15,
            enable_session_cleanup: false,
            cleanup_interval_minutes: 10,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}

#[test]
fn test_config_serialization_deserialization() {
    let config = create_test_config();

    let json_str = serde_json::to_string_pretty(&config).unwrap();
    assert!(json_str.contains("4000"));
    assert!(json_str.contains("0.0.0.0"));

    let deserialized: Config = serde_json::from_str(&json_str).unwrap();
    assert_eq!(deserialized, config);
}

#[test]
fn test_config_file_operations() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("test_config.json");

    let original_config = create_test_config();
    original_config.save_to_file(&config_path).unwrap();
    assert!(config_path.exists());

    let loaded_config = Config::from_file(&config_path).unwrap();
    assert_eq!(loaded_config, original_config);
    assert_eq!(loaded_config.bind_address(), "0.0.0.0:4000");
}

#[test]
fn test_config_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = Config::from_file(temp_dir.path().join("missing.json"));

    assert!(matches!(result, Err(ConfigError::FileReadError(_))));
}

#[test]
fn test_config_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.json");
    fs::write(&config_path, "{ \"server\": ").unwrap();

    let result = Config::from_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.server.port = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.sessions.max_sessions = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field, .. }) if field == "sessions.max_sessions"
    ));

    let mut config = Config::default();
    config.sessions.session_timeout_minutes = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_rejects_oversized_durations() {
    let mut config = Config::default();
    config.sessions.session_timeout_minutes = i64::MAX;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field, .. }) if field == "sessions.session_timeout_minutes"
    ));

    let mut config = Config::default();
    config.sessions.session_timeout_minutes = MAX_DURATION_MINUTES + 1;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.sessions.cleanup_interval_minutes = u64::MAX;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { field, .. }) if field == "sessions.cleanup_interval_minutes"
    ));

    config.sessions.enable_session_cleanup = false;
    assert!(config.validate().is_err());
}

#[test]
fn test_default_values() {
    let config = Config::default();

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.sessions.max_sessions, 100);
    assert_eq!(config.sessions.session_timeout_minutes, 30);
    assert_eq!(config.logging.level, "info");
    assert!(config.server.enable_cors);
}
