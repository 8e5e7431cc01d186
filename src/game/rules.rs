//! 三目並べのルール実装モジュール
//! 勝利ライン判定、引き分け判定、着手可否の判定を担当する。

use super::board::Board;
use super::types::{Cell, RuleResult};

/// 勝利ラインとなる8本のマス番号の組
/// 行3本、列3本、対角線2本の順で並ぶ。この順序が同時成立時の優先順位となる
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 三目並べのルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct TicTacToeRules;

impl TicTacToeRules {
    /// 盤面の勝敗を判定する
    /// 決着していない場合はNoneを返す
    pub fn evaluate(board: &Board) -> Option<RuleResult> {
        let cells = board.cells();

        for line in WINNING_LINES {
            let [a, b, c] = line;
            if let Some(player) = cells[a].player() {
                if cells[a] == cells[b] && cells[a] == cells[c] {
                    return Some(RuleResult::win(player, line));
                }
            }
        }

        if board.is_full() {
            return Some(RuleResult::draw());
        }

        None
    }

    /// 着手可能なマスを全て取得する
    /// 決着済みの盤面では空リストを返す
    pub fn playable_cells(board: &Board) -> Vec<usize> {
        if Self::evaluate(board).is_some() {
            return Vec::new();
        }
        board
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{Outcome, Player, CELL_COUNT};
    use crate::game::types::Cell::{Empty as E, O, X};

    fn board_with_line(line: [usize; 3], cell: Cell) -> Board {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for index in line {
            cells[index] = cell;
        }
        Board::from_cells(cells)
    }

    #[test]
    fn test_evaluate_empty_board() {
        assert_eq!(TicTacToeRules::evaluate(&Board::new()), None);
    }

    #[test]
    fn test_evaluate_every_winning_line() {
        for line in WINNING_LINES {
            for (cell, player) in [(X, Player::X), (O, Player::O)] {
                let result = TicTacToeRules::evaluate(&board_with_line(line, cell));
                assert_eq!(result, Some(RuleResult::win(player, line)));
            }
        }
    }

    #[test]
    fn test_evaluate_draw() {
        let board = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        let result = TicTacToeRules::evaluate(&board).unwrap();

        assert_eq!(result.outcome, Outcome::Draw);
        assert_eq!(result.winning_line, None);
    }

    #[test]
    fn test_evaluate_full_board_with_line_is_win() {
        let board = Board::from_cells([X, X, X, O, O, X, O, X, O]);
        let result = TicTacToeRules::evaluate(&board).unwrap();

        assert_eq!(result.outcome, Outcome::Winner(Player::X));
        assert_eq!(result.winning_line, Some([0, 1, 2]));
    }

    #[test]
    fn test_evaluate_first_line_in_order_wins() {
        // 不正な盤面でも列挙順で最初のラインを採用する
        let board = Board::from_cells([O, O, O, X, X, X, E, E, E]);
        let result = TicTacToeRules::evaluate(&board).unwrap();

        assert_eq!(result.outcome, Outcome::Winner(Player::O));
        assert_eq!(result.winning_line, Some([0, 1, 2]));
    }

    #[test]
    fn test_evaluate_ongoing() {
        let board = Board::from_cells([X, O, X, E, O, E, E, E, E]);
        assert_eq!(TicTacToeRules::evaluate(&board), None);
    }

    #[test]
    fn test_playable_cells() {
        let board = Board::from_cells([X, O, E, E, E, E, E, E, X]);
        assert_eq!(TicTacToeRules::playable_cells(&board), vec![2, 3, 4, 5, 6, 7]);

        let won = board_with_line([2, 4, 6], O);
        assert!(TicTacToeRules::playable_cells(&won).is_empty());
    }
}
