//! 着手履歴管理モジュール
//! 盤面スナップショットの列と、表示中のエントリを指すポインタを管理する。
//! 履歴は分岐しない一本の時系列で、過去の位置から着手すると以降の履歴は破棄される。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::board::Board;
use super::types::{Player, Position};
use crate::error::{GameError, Result};

/// 履歴の1エントリ
/// 開始局面のmove_indexはNone、それ以外は直前に着手したマス番号を持つ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub board: Board,
    pub move_index: Option<usize>,
}

impl HistoryEntry {
    pub fn start() -> Self {
        Self {
            board: Board::new(),
            move_index: None,
        }
    }

    /// 着手したマスの座標
    pub fn position(&self) -> Option<Position> {
        self.move_index.and_then(Position::from_index)
    }
}

/// 盤面履歴と表示位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    entries: Vec<HistoryEntry>,
    current_move: usize,
}

impl GameHistory {
    /// 開始局面のみを持つ履歴を作成する
    pub fn new() -> Self {
        Self {
            entries: vec![HistoryEntry::start()],
            current_move: 0,
        }
    }

    pub fn current_board(&self) -> &Board {
        &self.entries[self.current_move].board
    }

    /// 表示中の局面で最後に着手されたマス
    pub fn current_move_meta(&self) -> Option<usize> {
        self.entries[self.current_move].move_index
    }

    pub fn current_move(&self) -> usize {
        self.current_move
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// 開始局面を含むため常に1以上
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_at_latest(&self) -> bool {
        self.current_move + 1 == self.entries.len()
    }

    /// 表示中の局面でXの手番かどうか
    pub fn x_is_next(&self) -> bool {
        self.current_move % 2 == 0
    }

    pub fn next_player(&self) -> Player {
        Player::for_move_number(self.current_move)
    }

    /// 表示位置を指定したエントリに移動する
    /// 範囲外の場合はInvalidIndexを返す
    pub fn jump_to(&mut self, move_number: usize) -> Result<()> {
        if move_number >= self.entries.len() {
            return Err(GameError::InvalidIndex {
                index: move_number,
                len: self.entries.len(),
            });
        }
        self.current_move = move_number;
        Ok(())
    }

    /// 新しい盤面を記録する
    /// 表示位置より後のエントリを切り捨ててから追加し、表示位置を末尾に進める
    pub fn play(&mut self, next_board: Board, move_index: usize) {
        let discarded = self.entries.len() - (self.current_move + 1);
        if discarded > 0 {
            debug!(discarded, from = self.current_move, "discarding future history");
        }

        self.entries.truncate(self.current_move + 1);
        self.entries.push(HistoryEntry {
            board: next_board,
            move_index: Some(move_index),
        });
        self.current_move = self.entries.len() - 1;
    }

    /// 開始局面のみの状態に戻す
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(HistoryEntry::start());
        self.current_move = 0;
    }
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new()
    }
}
