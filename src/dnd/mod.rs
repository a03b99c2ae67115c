pub mod collision;
pub mod engine;
pub mod geometry;
pub mod state;

pub use collision::{Collision, CollisionArgs, CollisionDetector, Droppable, RectCollisions};
pub use engine::DragEngine;
pub use geometry::{Point, Rect};
pub use state::{ActiveDrag, DragEvent, DragState, DropTarget};
