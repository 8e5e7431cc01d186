//! ゲーム進行の制御モジュール
//! 履歴とルールを組み合わせ、着手・タイムトラベル・並び替え・リスタートを扱う。
//! 勝敗や手番は保存せず、表示中の盤面から毎回導出する。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::board::Board;
use super::history::GameHistory;
use super::move_list::{self, MoveListEntry, SortOrder};
use super::rules::TicTacToeRules;
use super::types::{Outcome, Player, RuleResult, CELL_COUNT};
use crate::error::{GameError, Result};

/// 着手が無視された理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// 既に印があるマス
    Occupied,
    /// 表示中の盤面で勝敗が決している
    GameDecided,
}

/// 着手の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Played { player: Player, index: usize },
    Ignored(IgnoreReason),
}

impl MoveOutcome {
    pub fn is_played(&self) -> bool {
        matches!(self, MoveOutcome::Played { .. })
    }
}

/// 表示中の盤面から導出されるゲームの進行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress { next_player: Player },
    Won { winner: Player, line: [usize; 3] },
    Drawn,
}

impl GameStatus {
    pub fn is_decided(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }

    /// ステータス行に表示する文字列
    pub fn text(&self) -> String {
        match self {
            GameStatus::InProgress { next_player } => format!("Next player: {}", next_player),
            GameStatus::Won { winner, .. } => format!("Winner: {}", winner),
            GameStatus::Drawn => "Cat's game".to_string(),
        }
    }
}

/// 1つのゲームインスタンスの全状態
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameController {
    pub id: Uuid,
    history: GameHistory,
    sort_order: SortOrder,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl GameController {
    pub fn new() -> Self {
        Self::new_with_id(Uuid::new_v4())
    }

    /// 指定IDで新しいゲームを作成する
    pub fn new_with_id(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            history: GameHistory::new(),
            sort_order: SortOrder::Ascending,
            created_at: now,
            last_updated: now,
        }
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    pub fn current_board(&self) -> &Board {
        self.history.current_board()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn next_player(&self) -> Player {
        self.history.next_player()
    }

    /// 表示中の局面で最後に着手されたマス
    pub fn last_played(&self) -> Option<usize> {
        self.history.current_move_meta()
    }

    pub fn evaluate(&self) -> Option<RuleResult> {
        TicTacToeRules::evaluate(self.current_board())
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.evaluate().and_then(|result| result.winning_line)
    }

    pub fn status(&self) -> GameStatus {
        match self.evaluate() {
            Some(RuleResult {
                outcome: Outcome::Winner(winner),
                winning_line: Some(line),
            }) => GameStatus::Won { winner, line },
            Some(_) => GameStatus::Drawn,
            None => GameStatus::InProgress {
                next_player: self.next_player(),
            },
        }
    }

    pub fn status_text(&self) -> String {
        self.status().text()
    }

    /// 表示中の盤面に着手する
    /// 埋まったマスや決着後の着手はIgnoredとして返し、履歴を変更しない
    pub fn attempt_move(&mut self, index: usize) -> Result<MoveOutcome> {
        if index >= CELL_COUNT {
            return Err(GameError::InvalidCell { index });
        }

        let board = self.history.current_board();
        if !board.is_empty(index) {
            debug!(game_id = %self.id, index, "move ignored: cell occupied");
            return Ok(MoveOutcome::Ignored(IgnoreReason::Occupied));
        }
        if TicTacToeRules::evaluate(board).is_some() {
            debug!(game_id = %self.id, index, "move ignored: game already decided");
            return Ok(MoveOutcome::Ignored(IgnoreReason::GameDecided));
        }

        let player = self.history.next_player();
        let next_board = board
            .with_mark(index, player.to_cell())
            .ok_or(GameError::InvalidCell { index })?;
        self.history.play(next_board, index);
        self.touch();

        debug!(game_id = %self.id, %player, index, move_number = self.history.current_move(), "move played");
        Ok(MoveOutcome::Played { player, index })
    }

    /// 履歴の指定位置に表示を移動する
    pub fn jump_to(&mut self, move_number: usize) -> Result<()> {
        self.history.jump_to(move_number)?;
        self.touch();
        debug!(game_id = %self.id, move_number, "jumped in history");
        Ok(())
    }

    /// 履歴リストの並び順を切り替える
    pub fn toggle_sort(&mut self) {
        self.sort_order = self.sort_order.toggled();
        self.touch();
        debug!(game_id = %self.id, order = ?self.sort_order, "sort order toggled");
    }

    /// 履歴と並び順を初期状態に戻す
    pub fn restart(&mut self) {
        self.history.reset();
        self.sort_order = SortOrder::Ascending;
        self.touch();
        debug!(game_id = %self.id, "game restarted");
    }

    /// 現在の並び順での履歴リスト
    pub fn move_list(&self) -> Vec<MoveListEntry> {
        move_list::build(&self.history, self.sort_order)
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}
