use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::dto::{
    ErrorResponse, GameResponse, JumpRequest, MoveRequest, MoveResponse, SessionListResponse,
    SessionSummary,
};
use crate::session::GameSessionManager;

type HandlerResult<T> = std::result::Result<T, (StatusCode, Json<ErrorResponse>)>;

#[derive(Debug, Clone)]
pub struct AppState {
    pub sessions: Arc<GameSessionManager>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_session_manager(Arc::new(GameSessionManager::default()))
    }

    pub fn with_session_manager(sessions: Arc<GameSessionManager>) -> Self {
        Self { sessions }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn create_game(
    State(state): State<AppState>,
) -> HandlerResult<(StatusCode, Json<GameResponse>)> {
    let game_id = state.sessions.create_session()?;
    let game = state.sessions.get_session(&game_id)?;

    Ok((StatusCode::CREATED, Json(GameResponse::from_game(&game))))
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> HandlerResult<Json<GameResponse>> {
    let game = state.sessions.get_session(&game_id)?;
    Ok(Json(GameResponse::from_game(&game)))
}

pub async fn make_move(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<MoveRequest>,
) -> HandlerResult<Json<MoveResponse>> {
    let response = state.sessions.with_session_mut(&game_id, |game| {
        let outcome = game.attempt_move(payload.index)?;
        Ok(MoveResponse::new(outcome, game))
    })?;

    Ok(Json(response))
}

pub async fn jump_to(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<JumpRequest>,
) -> HandlerResult<Json<GameResponse>> {
    let response = state.sessions.with_session_mut(&game_id, |game| {
        game.jump_to(payload.move_number)?;
        Ok(GameResponse::from_game(game))
    })?;

    Ok(Json(response))
}

pub async fn toggle_sort(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> HandlerResult<Json<GameResponse>> {
    let response = state.sessions.with_session_mut(&game_id, |game| {
        game.toggle_sort();
        Ok(GameResponse::from_game(game))
    })?;

    Ok(Json(response))
}

pub async fn restart_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> HandlerResult<Json<GameResponse>> {
    let response = state.sessions.with_session_mut(&game_id, |game| {
        game.restart();
        Ok(GameResponse::from_game(game))
    })?;

    Ok(Json(response))
}

pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> HandlerResult<StatusCode> {
    state.sessions.remove_session(&game_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_sessions(State(state): State<AppState>) -> Json<SessionListResponse> {
    let sessions: Vec<SessionSummary> = state
        .sessions
        .list_sessions()
        .iter()
        .map(SessionSummary::from_game)
        .collect();

    Json(SessionListResponse {
        total_count: sessions.len(),
        sessions,
    })
}
