//! ブラウザ向けゲーム画面モジュール
//! 表示中の局面をHTMLとして描画し、フォーム送信で各操作を受け付ける。
//! 操作後は常にゲーム画面へリダイレクトする。

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use super::handlers::AppState;
use crate::error::GameError;
use crate::game::{Cell, GameController, MoveListEntry, Position, BOARD_SIZE};

const STYLESHEET: &str = "
body { font-family: sans-serif; margin: 20px; }
form { display: inline; margin: 0; }
.game { display: flex; flex-direction: row; }
.game-info { margin-left: 20px; }
.status { margin-bottom: 10px; }
.board-row { display: flex; }
.square { background: #fff; border: 1px solid #999; font-size: 24px; font-weight: bold;
  height: 48px; width: 48px; margin: -1px -1px 0 0; padding: 0; cursor: pointer; }
.winning-square { background: #ffd54f; }
.last-square { color: #d32f2f; }
.restart-button { margin-left: 8px; }
";

/// 画面操作で発生したエラー
/// JSON APIと同じステータスコードで簡易的なHTMLを返す
pub struct PageError(GameError);

impl From<GameError> for PageError {
    fn from(err: GameError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status: StatusCode = self.0.status_code();
        let body = format!(
            "<!DOCTYPE html><html><body><h1>{}</h1><p>{}</p><p><a href=\"/\">New game</a></p></body></html>",
            status, self.0
        );
        (status, Html(body)).into_response()
    }
}

type PageResult<T> = std::result::Result<T, PageError>;

fn game_url(game_id: Uuid) -> String {
    format!("/games/{}", game_id)
}

fn post_button(action: &str, class: Option<&str>, content: &str) -> String {
    let class_attr = class.map(|c| format!(" class=\"{}\"", c)).unwrap_or_default();
    format!(
        "<form method=\"post\" action=\"{}\"><button type=\"submit\"{}>{}</button></form>",
        action, class_attr, content
    )
}

fn render_square(game_id: Uuid, index: usize, cell: Cell, winning: bool, last_played: bool) -> String {
    let value = match cell.player() {
        Some(player) => player.to_string(),
        None => String::new(),
    };
    let content = if last_played {
        format!("<div class=\"last-square\">{}</div>", value)
    } else {
        format!("<div>{}</div>", value)
    };
    let class = if winning { "square winning-square" } else { "square" };

    post_button(&format!("{}/cells/{}", game_url(game_id), index), Some(class), &content)
}

fn render_move_entry(game_id: Uuid, entry: &MoveListEntry) -> String {
    if entry.interactive {
        let action = format!("{}/jump/{}", game_url(game_id), entry.move_number);
        format!("<li>{}</li>", post_button(&action, None, &entry.label))
    } else {
        format!("<li><div>{}</div></li>", entry.label)
    }
}

/// ゲーム画面全体のHTMLを生成する
pub fn render_game(game: &GameController) -> String {
    let winning_line = game.winning_line();
    let is_winning = |index: usize| winning_line.is_some_and(|line| line.contains(&index));
    let last_played = game.last_played();

    let mut board = String::new();
    let current = game.current_board();
    for row in 0..BOARD_SIZE {
        board.push_str("<div class=\"board-row\">");
        for position in (0..BOARD_SIZE).filter_map(|col| Position::new(row, col)) {
            let index = position.index();
            let cell = current.get_cell_at(position).unwrap_or_default();
            board.push_str(&render_square(
                game.id,
                index,
                cell,
                is_winning(index),
                last_played == Some(index),
            ));
        }
        board.push_str("</div>");
    }

    let moves: String = game
        .move_list()
        .iter()
        .map(|entry| render_move_entry(game.id, entry))
        .collect();

    let base = game_url(game.id);
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Tic-Tac-Toe</title><style>{}</style></head>\
<body><div class=\"game\"><div class=\"game-board\"><h1 class=\"status\">{}</h1>{}</div>\
<div class=\"game-info\">{}{}<ul>{}</ul></div></div></body></html>",
        STYLESHEET,
        game.status_text(),
        board,
        post_button(&format!("{}/toggle-sort", base), None, "Toggle Sort"),
        post_button(&format!("{}/restart", base), Some("restart-button"), "Restart Game"),
        moves,
    )
}

pub async fn new_game(State(state): State<AppState>) -> PageResult<Redirect> {
    let game_id = state.sessions.create_session()?;
    Ok(Redirect::to(&game_url(game_id)))
}

pub async fn show_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> PageResult<Html<String>> {
    let game = state.sessions.get_session(&game_id)?;
    Ok(Html(render_game(&game)))
}

/// マスのクリック
/// 埋まったマスや決着後のクリックは何もせず画面を再表示する
pub async fn click_cell(
    State(state): State<AppState>,
    Path((game_id, index)): Path<(Uuid, usize)>,
) -> PageResult<Redirect> {
    state
        .sessions
        .with_session_mut(&game_id, |game| game.attempt_move(index))?;
    Ok(Redirect::to(&game_url(game_id)))
}

pub async fn click_jump(
    State(state): State<AppState>,
    Path((game_id, move_number)): Path<(Uuid, usize)>,
) -> PageResult<Redirect> {
    state
        .sessions
        .with_session_mut(&game_id, |game| game.jump_to(move_number))?;
    Ok(Redirect::to(&game_url(game_id)))
}

pub async fn click_toggle_sort(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> PageResult<Redirect> {
    state.sessions.with_session_mut(&game_id, |game| {
        game.toggle_sort();
        Ok(())
    })?;
    Ok(Redirect::to(&game_url(game_id)))
}

pub async fn click_restart(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> PageResult<Redirect> {
    state.sessions.with_session_mut(&game_id, |game| {
        game.restart();
        Ok(())
    })?;
    Ok(Redirect::to(&game_url(game_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_new_game() {
        let game = GameController::new();
        let html = render_game(&game);

        assert!(html.contains("<h1 class=\"status\">Next player: X</h1>"));
        assert_eq!(html.matches("class=\"square\"").count(), 9);
        assert!(html.contains("<li><div>You are at the game start</div></li>"));
        assert!(html.contains("Toggle Sort"));
        assert!(html.contains("Restart Game"));
    }

    #[test]
    fn test_render_highlights_winning_line_and_last_move() {
        let mut game = GameController::new();
        for index in [0, 4, 1, 3, 2] {
            game.attempt_move(index).unwrap();
        }
        let html = render_game(&game);

        assert!(html.contains("Winner: X"));
        assert_eq!(html.matches("square winning-square").count(), 3);
        assert_eq!(html.matches("<div class=\"last-square\">X</div>").count(), 1);
        assert!(html.contains("You are at move #5 (0, 2)"));
        assert!(html.contains(&format!("/games/{}/jump/0", game.id)));
    }

    #[test]
    fn test_render_draw_has_no_winning_squares() {
        let mut game = GameController::new();
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.attempt_move(index).unwrap();
        }
        let html = render_game(&game);

        assert!(html.contains("Cat's game"));
        assert!(!html.contains("winning-square\""));
    }
}
