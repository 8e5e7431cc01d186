pub mod types;
pub mod board;
pub mod rules;
pub mod history;
pub mod move_list;
pub mod controller;

pub use types::*;
pub use board::*;
pub use rules::*;
pub use history::*;
pub use move_list::{MoveListEntry, SortOrder};
pub use controller::*;
