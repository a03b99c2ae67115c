use crate::dnd::geometry::Rect;
use crate::domain::{DragId, ListSnapshot};

/// Per-drag bookkeeping. Lives only while the view is mounted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    pub active_id: Option<DragId>,
    /// Target of the last successful resolution, reused when a frame misses
    pub last_over_id: Option<DragId>,
    /// Set right after a cross-list move, cleared on the next frame
    pub recently_moved: bool,
    /// Lists as they were at drag start; present only during a drag
    pub snapshot: Option<ListSnapshot>,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.active_id.is_some()
    }

    /// Drops all per-drag data. `recently_moved` is left for the frame
    /// settle to clear.
    pub fn finish(&mut self) {
        self.active_id = None;
        self.last_over_id = None;
        self.snapshot = None;
    }
}

/// The dragged element as reported by the input layer
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub id: DragId,
    /// Current rect of the dragged element, if it has been measured
    pub translated_rect: Option<Rect>,
}

impl ActiveDrag {
    pub fn new(id: impl Into<DragId>, translated_rect: Option<Rect>) -> Self {
        Self {
            id: id.into(),
            translated_rect,
        }
    }
}

/// The resolved drop target and its measured rect
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub id: DragId,
    pub rect: Rect,
}

impl DropTarget {
    pub fn new(id: impl Into<DragId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Raw drag lifecycle events
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Start {
        active: DragId,
    },
    Over {
        active: ActiveDrag,
        over: Option<DropTarget>,
    },
    End {
        active: ActiveDrag,
        over: Option<DropTarget>,
    },
    Cancel,
}
