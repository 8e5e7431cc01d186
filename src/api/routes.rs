use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::{
    handlers::{
        create_game, delete_game, get_game, jump_to, list_sessions, make_move, restart_game,
        toggle_sort, AppState,
    },
    middleware::{cors, logging},
    page::{click_cell, click_jump, click_restart, click_toggle_sort, new_game, show_game},
};
use crate::config::ServerConfig;

/// ブラウザ画面用のルート
pub fn create_page_router() -> Router<AppState> {
    Router::new()
        .route("/", get(new_game))
        .route("/games/:id", get(show_game))
        .route("/games/:id/cells/:index", post(click_cell))
        .route("/games/:id/jump/:move_number", post(click_jump))
        .route("/games/:id/toggle-sort", post(click_toggle_sort))
        .route("/games/:id/restart", post(click_restart))
}

/// JSON API用のルート
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/api/games", post(create_game))
        .route("/api/games/:id", get(get_game).delete(delete_game))
        .route("/api/games/:id/move", post(make_move))
        .route("/api/games/:id/jump", post(jump_to))
        .route("/api/games/:id/toggle-sort", post(toggle_sort))
        .route("/api/games/:id/restart", post(restart_game))
        .route("/api/sessions", get(list_sessions))
}

pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let mut router = create_page_router()
        .merge(create_api_router())
        .route("/health", get(health_check));

    if server.enable_cors {
        router = router.layer(middleware::from_fn(cors));
    }
    if server.enable_logging {
        router = router.layer(middleware::from_fn(logging));
    }

    router.with_state(state)
}

async fn health_check() -> &'static str {
    "Tic-Tac-Toe server is running"
}
