pub mod board;
pub mod card;
pub mod ids;

pub use board::{array_move, Board, ListMap, ListSnapshot};
pub use card::Card;
pub use ids::{BoardId, CardId, DragId, ListId};
