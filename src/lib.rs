//! # Boardview Core
//!
//! Client-side core of a kanban board view: the board model, a
//! single-writer store for it, and the drag-and-drop reconciliation that
//! keeps lists and cards consistent while the user drags them around.
//!
//! Nothing here renders or measures. Hosts feed in drag events and
//! per-frame geometry and get back mutations to apply.

pub mod config;
pub mod dnd;
pub mod domain;
pub mod error;
pub mod source;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use config::ViewConfig;
pub use dnd::{
    ActiveDrag, CollisionArgs, CollisionDetector, DragEngine, DragEvent, DragState, DropTarget,
    Droppable, Point, Rect, RectCollisions,
};
pub use domain::{Board, BoardId, Card, CardId, DragId, ListId, ListMap, ListSnapshot};
pub use error::{BoardError, Result};
pub use source::BoardSource;
#[cfg(feature = "file-source")]
pub use source::FileBoardSource;
pub use store::{BoardStore, Mutation, SharedBoardStore};
pub use view::{BoardView, DragFrame, FrameSettle, MountOutcome};
