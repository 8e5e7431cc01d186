//! 三目並べの盤面スナップショットを管理するモジュール
//! 盤面は一度作成されたら変更されず、着手は常に新しい盤面を生成する。

use super::types::{Cell, Position, BOARD_SIZE, CELL_COUNT};
use serde::{Deserialize, Serialize};

/// 3x3の盤面を表現する構造体
/// 行優先で0-8のマス番号を持つ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// 全マスが空の盤面を作成する
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// セル配列から盤面を作成する
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// 指定したマスの状態を取得する
    /// 範囲外の場合はNoneを返す
    pub fn get_cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn get_cell_at(&self, position: Position) -> Option<Cell> {
        if position.is_valid() {
            self.get_cell(position.index())
        } else {
            None
        }
    }

    /// 指定したマスに印を置いた新しい盤面を返す
    /// 元の盤面は変更しない。範囲外の場合はNoneを返す
    pub fn with_mark(&self, index: usize, cell: Cell) -> Option<Board> {
        if index >= CELL_COUNT {
            return None;
        }
        let mut cells = self.cells;
        cells[index] = cell;
        Some(Board { cells })
    }

    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get_cell(index), Some(Cell::Empty))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// 盤面上のXとOの数を数える
    /// 戻り値: (X数, O数)
    pub fn count_marks(&self) -> (u8, u8) {
        self.cells.iter().fold((0, 0), |(x, o), cell| match cell {
            Cell::X => (x + 1, o),
            Cell::O => (x, o + 1),
            Cell::Empty => (x, o),
        })
    }

    /// デバッグ用の盤面表示文字列を生成する
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in self.cells.chunks(BOARD_SIZE) {
            let line: Vec<&str> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".",
                    Cell::X => "X",
                    Cell::O => "O",
                })
                .collect();
            result.push_str(&line.join(" "));
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_new_is_empty() {
        let board = Board::new();
        for index in 0..CELL_COUNT {
            assert!(board.is_empty(index));
        }
        assert!(!board.is_full());
        assert_eq!(board.count_marks(), (0, 0));
    }

    #[test]
    fn test_board_get_cell_out_of_range() {
        let board = Board::new();
        assert_eq!(board.get_cell(9), None);
        assert_eq!(board.get_cell_at(Position { row: 3, col: 0 }), None);
    }

    #[test]
    fn test_with_mark_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with_mark(4, Cell::X).unwrap();

        assert_eq!(board.get_cell(4), Some(Cell::Empty));
        assert_eq!(next.get_cell(4), Some(Cell::X));
        assert_eq!(next.get_cell_at(Position::new(1, 1).unwrap()), Some(Cell::X));
        assert_ne!(board, next);
    }

    #[test]
    fn test_with_mark_out_of_range() {
        assert!(Board::new().with_mark(9, Cell::O).is_none());
    }

    #[test]
    fn test_board_is_full_and_counts() {
        use crate::game::types::Cell::{O, X};
        let board = Board::from_cells([X, O, X, O, O, X, O, X, X]);
        assert!(board.is_full());
        assert_eq!(board.count_marks(), (5, 4));
    }

    #[test]
    fn test_board_display() {
        let board = Board::new().with_mark(0, Cell::X).unwrap();
        assert_eq!(board.display(), "X . .\n. . .\n. . .\n");
    }
}
