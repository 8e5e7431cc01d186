//! 三目並べの基本型定義モジュール
//! マス、プレイヤー、座標、勝敗判定結果などの基本的な型を定義する。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤面の1辺のマス数
pub const BOARD_SIZE: usize = 3;

/// 盤面の総マス数
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 盤面の各マスの状態を表現するenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// マスに置かれているプレイヤーを返す（空マスはNone）
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// ゲームのプレイヤーを表すenum
/// 先手は常にX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// 相手プレイヤーを返す
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// プレイヤーを対応するセル状態に変換する
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// 履歴上の位置から手番を求める
    /// 偶数番目のエントリはXの手番
    pub fn for_move_number(move_number: usize) -> Player {
        if move_number % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// 3x3盤面上の座標を表す構造体
/// row, colともに0-2の範囲で有効
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// 範囲チェック付きのコンストラクタ
    pub fn new(row: usize, col: usize) -> Option<Position> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// 行優先のマス番号(0-8)から座標に変換する
    pub fn from_index(index: usize) -> Option<Position> {
        if index < CELL_COUNT {
            Some(Position {
                row: index / BOARD_SIZE,
                col: index % BOARD_SIZE,
            })
        } else {
            None
        }
    }

    /// 座標を行優先のマス番号に変換する
    pub fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

/// 決着の種類
/// 引き分けは "Cat's game" と表示される
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// 勝敗判定の結果
/// 引き分けの場合は勝利ラインを持たない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub outcome: Outcome,
    pub winning_line: Option<[usize; 3]>,
}

impl RuleResult {
    pub fn win(player: Player, line: [usize; 3]) -> Self {
        Self {
            outcome: Outcome::Winner(player),
            winning_line: Some(line),
        }
    }

    pub fn draw() -> Self {
        Self {
            outcome: Outcome::Draw,
            winning_line: None,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::Winner(player) => Some(player),
            Outcome::Draw => None,
        }
    }
}
