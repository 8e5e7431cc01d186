//! アプリケーション全体のエラー定義モジュール
//! ゲーム操作とセッション管理のエラーを統一管理。

use thiserror::Error;
use uuid::Uuid;

/// ゲームロジックに関連するエラー
/// 埋まったマスへの着手や決着後の着手はエラーではなく無視として扱う
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid history index: {index} (history has {len} entries)")]
    InvalidIndex { index: usize, len: usize },

    #[error("Invalid cell index: {index} (expected 0-8)")]
    InvalidCell { index: usize },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: Uuid },

    #[error("Session limit exceeded (max: {max})")]
    SessionLimitExceeded { max: usize },
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::InvalidIndex { index: 5, len: 3 };
        assert_eq!(err.to_string(), "Invalid history index: 5 (history has 3 entries)");

        let err = GameError::InvalidCell { index: 9 };
        assert!(err.to_string().contains("expected 0-8"));

        let err = GameError::SessionLimitExceeded { max: 2 };
        assert!(err.to_string().contains("max: 2"));
    }
}
