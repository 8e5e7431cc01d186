//! 履歴リストの表示項目を導出するモジュール
//! 各エントリの説明文と、ジャンプボタンとして表示するかどうかを決める。

use serde::{Deserialize, Serialize};

use super::history::GameHistory;
use super::types::Position;

/// 履歴リストの並び順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, SortOrder::Descending)
    }
}

/// 履歴リストの1項目
/// interactiveがfalseの項目は単なるテキストとして表示する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveListEntry {
    pub move_number: usize,
    pub label: String,
    pub interactive: bool,
    pub is_current: bool,
}

/// 履歴エントリの説明文を生成する
pub fn describe(move_number: usize, position: Option<Position>, is_current: bool) -> String {
    match (move_number, position) {
        (0, _) | (_, None) if is_current => "You are at the game start".to_string(),
        (0, _) | (_, None) => "Go to game start".to_string(),
        (n, Some(pos)) if is_current => format!("You are at move #{} ({}, {})", n, pos.row, pos.col),
        (n, Some(pos)) => format!("Go to move #{} ({}, {})", n, pos.row, pos.col),
    }
}

/// 履歴全体から表示用の項目列を作る
/// 開始局面を表示中のときだけ開始エントリを非インタラクティブにする
pub fn build(history: &GameHistory, order: SortOrder) -> Vec<MoveListEntry> {
    let current = history.current_move();
    let mut entries: Vec<MoveListEntry> = history
        .entries()
        .iter()
        .enumerate()
        .map(|(move_number, entry)| {
            let is_current = move_number == current;
            MoveListEntry {
                move_number,
                label: describe(move_number, entry.position(), is_current),
                interactive: !(move_number == 0 && is_current),
                is_current,
            }
        })
        .collect();

    if order.is_descending() {
        entries.reverse();
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with(moves: &[usize]) -> GameHistory {
        let mut history = GameHistory::new();
        for &index in moves {
            let mark = history.next_player().to_cell();
            let next = history.current_board().with_mark(index, mark).unwrap();
            history.play(next, index);
        }
        history
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(0, None, true), "You are at the game start");
        assert_eq!(describe(0, None, false), "Go to game start");
        let pos = Position::from_index(5);
        assert_eq!(describe(3, pos, true), "You are at move #3 (1, 2)");
        assert_eq!(describe(3, pos, false), "Go to move #3 (1, 2)");
    }

    #[test]
    fn test_build_start_only() {
        let entries = build(&GameHistory::new(), SortOrder::Ascending);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "You are at the game start");
        assert!(!entries[0].interactive);
        assert!(entries[0].is_current);
    }

    #[test]
    fn test_build_labels_follow_current_move() {
        let mut history = history_with(&[4, 0, 7]);
        history.jump_to(1).unwrap();

        let labels: Vec<String> = build(&history, SortOrder::Ascending)
            .into_iter()
            .map(|entry| entry.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Go to game start",
                "You are at move #1 (1, 1)",
                "Go to move #2 (0, 0)",
                "Go to move #3 (2, 1)",
            ]
        );
    }

    #[test]
    fn test_build_all_non_start_entries_are_buttons() {
        let history = history_with(&[0, 1]);
        let entries = build(&history, SortOrder::Ascending);

        assert!(!entries[0].interactive);
        assert!(entries[1].interactive);
        assert!(entries[2].interactive);
        assert!(entries[2].is_current);
    }

    #[test]
    fn test_build_descending() {
        let history = history_with(&[0, 1, 2]);
        let ascending = build(&history, SortOrder::Ascending);
        let descending = build(&history, SortOrder::Descending);

        let numbers: Vec<usize> = descending.iter().map(|e| e.move_number).collect();
        assert_eq!(numbers, vec![3, 2, 1, 0]);

        let mut reversed = descending.clone();
        reversed.reverse();
        assert_eq!(reversed, ascending);
    }

    #[test]
    fn test_sort_order_toggled() {
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
        assert_eq!(SortOrder::Ascending.toggled().toggled(), SortOrder::Ascending);
    }
}
