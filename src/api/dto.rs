//! ゲームAPI データ転送オブジェクト (DTO)

use axum::{http::StatusCode, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GameError;
use crate::game::{
    GameController, GameStatus, IgnoreReason, MoveListEntry, MoveOutcome, Outcome, Player,
    SortOrder, TicTacToeRules,
};

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub move_number: usize,
}

/// 表示中の局面をクライアントに返すためのレスポンス
#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub game_id: Uuid,
    pub board: Vec<Option<Player>>,
    pub status: String,
    pub outcome: Option<Outcome>,
    pub winning_line: Option<[usize; 3]>,
    pub next_player: Option<Player>,
    pub playable_cells: Vec<usize>,
    pub current_move: usize,
    pub history_len: usize,
    pub last_played: Option<usize>,
    pub sort_order: SortOrder,
    pub moves: Vec<MoveListEntry>,
}

impl GameResponse {
    pub fn from_game(game: &GameController) -> Self {
        let board = game
            .current_board()
            .cells()
            .iter()
            .map(|cell| cell.player())
            .collect();

        let status = game.status();
        let next_player = match status {
            GameStatus::InProgress { next_player } => Some(next_player),
            _ => None,
        };

        Self {
            game_id: game.id,
            board,
            status: status.text(),
            outcome: game.evaluate().map(|result| result.outcome),
            winning_line: game.winning_line(),
            next_player,
            playable_cells: TicTacToeRules::playable_cells(game.current_board()),
            current_move: game.history().current_move(),
            history_len: game.history().len(),
            last_played: game.last_played(),
            sort_order: game.sort_order(),
            moves: game.move_list(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub played: bool,
    pub player: Option<Player>,
    pub ignored_reason: Option<IgnoreReason>,
    pub game_state: GameResponse,
}

impl MoveResponse {
    pub fn new(outcome: MoveOutcome, game: &GameController) -> Self {
        let (player, ignored_reason) = match outcome {
            MoveOutcome::Played { player, .. } => (Some(player), None),
            MoveOutcome::Ignored(reason) => (None, Some(reason)),
        };

        Self {
            played: outcome.is_played(),
            player,
            ignored_reason,
            game_state: GameResponse::from_game(game),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub game_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub history_len: usize,
}

impl SessionSummary {
    pub fn from_game(game: &GameController) -> Self {
        Self {
            game_id: game.id,
            status: game.status_text(),
            created_at: game.created_at,
            last_updated: game.last_updated,
            history_len: game.history().len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub error_code: Option<String>,
}

impl ErrorResponse {
    pub fn with_code(error: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
            error_code: Some(code.into()),
        }
    }
}

/// ゲームエラーをHTTPレスポンスに対応付ける
impl GameError {
    pub fn error_code(&self) -> &'static str {
        match self {
            GameError::InvalidIndex { .. } => "INVALID_INDEX",
            GameError::InvalidCell { .. } => "INVALID_CELL",
            GameError::GameNotFound { .. } => "GAME_NOT_FOUND",
            GameError::SessionLimitExceeded { .. } => "MAX_SESSIONS_REACHED",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::InvalidIndex { .. } | GameError::InvalidCell { .. } => StatusCode::BAD_REQUEST,
            GameError::GameNotFound { .. } => StatusCode::NOT_FOUND,
            GameError::SessionLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl From<GameError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: GameError) -> Self {
        let status_code = err.status_code();
        let error_response = ErrorResponse::with_code(err.error_code(), err.to_string(), err.error_code());

        (status_code, Json(error_response))
    }
}
