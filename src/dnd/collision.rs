//! Collision detection primitives.
//!
//! The drag engine never measures anything itself: it asks a
//! [`CollisionDetector`] which droppables the dragged element currently
//! overlaps. [`RectCollisions`] answers from plain [`Rect`] geometry, which is
//! what hosts and tests feed in each frame.

use crate::dnd::geometry::{Point, Rect};
use crate::domain::DragId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A region something can be dropped on, as measured this frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    pub id: DragId,
    pub rect: Rect,
}

impl Droppable {
    pub fn new(id: impl Into<DragId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// One ranked hit. Lower-is-better or higher-is-better depends on the
/// primitive; results are always returned best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub id: DragId,
    pub value: f64,
}

/// Geometry of one drag frame, narrowed to a candidate set
#[derive(Debug, Clone)]
pub struct CollisionArgs<'a> {
    /// Translated rect of the dragged element
    pub collision_rect: Rect,
    pub pointer: Option<Point>,
    pub droppables: Vec<&'a Droppable>,
}

impl<'a> CollisionArgs<'a> {
    pub fn new(collision_rect: Rect, pointer: Option<Point>, droppables: &'a [Droppable]) -> Self {
        Self {
            collision_rect,
            pointer,
            droppables: droppables.iter().collect(),
        }
    }

    /// Same frame, keeping only droppables that match `keep`
    pub fn filtered(&self, keep: impl Fn(&Droppable) -> bool) -> CollisionArgs<'a> {
        CollisionArgs {
            collision_rect: self.collision_rect,
            pointer: self.pointer,
            droppables: self
                .droppables
                .iter()
                .copied()
                .filter(|d| keep(d))
                .collect(),
        }
    }

    pub fn rect_of(&self, id: &DragId) -> Option<Rect> {
        self.droppables
            .iter()
            .find(|d| &d.id == id)
            .map(|d| d.rect)
    }
}

/// Collision-detection capability supplied by the drag-and-drop input layer
pub trait CollisionDetector {
    /// Droppables containing the pointer, closest first. "Closest" is
    /// measured from the pointer to each droppable's center.
    fn pointer_within(&self, args: &CollisionArgs<'_>) -> Vec<Collision>;

    /// Droppables overlapping the dragged rect, largest overlap first
    fn rect_intersection(&self, args: &CollisionArgs<'_>) -> Vec<Collision>;

    /// All droppables ranked by center distance to the dragged rect
    fn closest_center(&self, args: &CollisionArgs<'_>) -> Vec<Collision>;
}

/// Pure geometric detector over the rects in [`CollisionArgs`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RectCollisions;

impl CollisionDetector for RectCollisions {
    fn pointer_within(&self, args: &CollisionArgs<'_>) -> Vec<Collision> {
        let Some(pointer) = args.pointer else {
            return Vec::new();
        };

        let mut hits: Vec<Collision> = args
            .droppables
            .iter()
            .filter(|d| d.rect.contains(&pointer))
            .map(|d| Collision {
                id: d.id.clone(),
                value: pointer.distance_to(&d.rect.center()),
            })
            .collect();

        hits.sort_by(ascending);
        hits
    }

    fn rect_intersection(&self, args: &CollisionArgs<'_>) -> Vec<Collision> {
        let mut hits: Vec<Collision> = args
            .droppables
            .iter()
            .filter_map(|d| {
                let ratio = args.collision_rect.intersection_ratio(&d.rect);
                (ratio > 0.0).then(|| Collision {
                    id: d.id.clone(),
                    value: ratio,
                })
            })
            .collect();

        hits.sort_by(|a, b| ascending(b, a));
        hits
    }

    fn closest_center(&self, args: &CollisionArgs<'_>) -> Vec<Collision> {
        let center = args.collision_rect.center();
        let mut hits: Vec<Collision> = args
            .droppables
            .iter()
            .map(|d| Collision {
                id: d.id.clone(),
                value: center.distance_to(&d.rect.center()),
            })
            .collect();

        hits.sort_by(ascending);
        hits
    }
}

fn ascending(a: &Collision, b: &Collision) -> Ordering {
    a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal)
}
