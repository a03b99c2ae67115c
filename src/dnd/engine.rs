//! Drag reconciliation.
//!
//! Turns drag lifecycle events into [`Mutation`]s against a [`Board`]. The
//! engine only reads the board; the caller dispatches whatever it returns.
//! Anything it cannot make sense of (unknown ids, missing targets) is a
//! silent no-op so an ambiguous drop can never take the view down.

use crate::dnd::collision::{CollisionArgs, CollisionDetector, RectCollisions};
use crate::dnd::state::{ActiveDrag, DragEvent, DragState, DropTarget};
use crate::domain::{array_move, Board, DragId, ListMap};
use crate::store::Mutation;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct DragEngine<D = RectCollisions> {
    detector: D,
}

impl<D: CollisionDetector> DragEngine<D> {
    pub fn new(detector: D) -> Self {
        Self { detector }
    }

    /// Single entry point for drag lifecycle events
    pub fn handle(&self, board: &Board, state: &mut DragState, event: DragEvent) -> Option<Mutation> {
        match event {
            DragEvent::Start { active } => {
                self.on_drag_start(board, state, active);
                None
            }
            DragEvent::Over { active, over } => self.on_drag_over(board, state, &active, over.as_ref()),
            DragEvent::End { active, over } => self.on_drag_end(board, state, &active, over.as_ref()),
            DragEvent::Cancel => self.on_drag_cancel(state),
        }
    }

    /// Picks the droppable the active element is over for this frame.
    ///
    /// Lists only ever land on lists. Cards prefer what the pointer is in,
    /// then whatever the dragged rect overlaps; a hit on a non-empty list is
    /// narrowed to the nearest card in it. On a miss the previous target is
    /// reused so transient layout shifts don't flicker.
    pub fn resolve_target(
        &self,
        board: &Board,
        state: &mut DragState,
        args: &CollisionArgs<'_>,
    ) -> Option<DragId> {
        if let Some(active) = state.active_id.as_ref().filter(|id| board.is_list(id)) {
            let lists_only = args.filtered(|d| board.is_list(&d.id));
            let hit = self
                .detector
                .closest_center(&lists_only)
                .into_iter()
                .next()
                .map(|c| c.id);

            debug!(active = %active, over = ?hit, "Resolved list drag target");
            if hit.is_some() {
                state.last_over_id = hit.clone();
            }
            return hit;
        }

        let pointer_hits = self.detector.pointer_within(args);
        let hits = if pointer_hits.is_empty() {
            self.detector.rect_intersection(args)
        } else {
            pointer_hits
        };

        let resolved = hits
            .into_iter()
            .next()
            .and_then(|first| self.narrow_to_card(board, args, first.id));

        if let Some(over) = resolved {
            state.last_over_id = Some(over.clone());
            return Some(over);
        }

        // Right after a cross-list move the layout reflows and nothing may be
        // under the pointer; treat the moved card itself as the target.
        if state.recently_moved {
            state.last_over_id = state.active_id.clone();
        }
        debug!(fallback = ?state.last_over_id, "No collision, using cached target");
        state.last_over_id.clone()
    }

    fn narrow_to_card(&self, board: &Board, args: &CollisionArgs<'_>, over: DragId) -> Option<DragId> {
        let Some(cards) = over.as_list().and_then(|list| board.cards_in(list)) else {
            return Some(over);
        };
        if cards.is_empty() {
            return Some(over);
        }

        let in_list = args.filtered(|d| {
            d.id != over && d.id.as_card().is_some_and(|card| cards.contains(card))
        });
        self.detector
            .closest_center(&in_list)
            .into_iter()
            .next()
            .map(|c| c.id)
    }

    pub fn on_drag_start(&self, board: &Board, state: &mut DragState, active: DragId) {
        debug!(board = %board.id, active = %active, "Drag started");
        state.active_id = Some(active);
        state.last_over_id = None;
        state.recently_moved = false;
        state.snapshot = Some(board.lists.clone());
    }

    /// Moves a card into another list while it is hovering there.
    ///
    /// Reordering inside one list and moving lists are left to drag end.
    pub fn on_drag_over(
        &self,
        board: &Board,
        state: &mut DragState,
        active: &ActiveDrag,
        over: Option<&DropTarget>,
    ) -> Option<Mutation> {
        let over = over?;
        if board.is_list(&active.id) {
            return None;
        }

        let (Some(over_list), Some(active_list)) = (board.find_list(&over.id), board.find_list(&active.id))
        else {
            debug!(active = %active.id, over = %over.id, "Drag over unknown id, ignoring");
            return None;
        };
        if over_list == active_list {
            return None;
        }
        let card = active.id.as_card()?;

        let over_cards = &board.lists[over_list];
        let append = over_cards.len() + 1;
        let index = if board.is_list(&over.id) {
            append
        } else {
            let below = active
                .translated_rect
                .is_some_and(|rect| rect.top > over.rect.top + over.rect.height);
            over.id
                .as_card()
                .and_then(|target| over_cards.iter().position(|c| c == target))
                .map_or(append, |i| i + usize::from(below))
        };

        let mut target = over_cards.clone();
        target.insert(index.min(target.len()), card.clone());
        let source: Vec<_> = board.lists[active_list]
            .iter()
            .filter(|c| *c != card)
            .cloned()
            .collect();

        let mut updated: ListMap = HashMap::new();
        updated.insert(active_list.clone(), source);
        updated.insert(over_list.clone(), target);

        state.recently_moved = true;
        debug!(card = %card, from = %active_list, to = %over_list, index, "Card moved across lists");
        Some(Mutation::MoveCard(updated))
    }

    /// Settles the drop. Always ends the drag, whether or not anything moved.
    pub fn on_drag_end(
        &self,
        board: &Board,
        state: &mut DragState,
        active: &ActiveDrag,
        over: Option<&DropTarget>,
    ) -> Option<Mutation> {
        let mutation = over.and_then(|over| self.reconcile_drop(board, &active.id, &over.id));
        debug!(active = %active.id, moved = mutation.is_some(), "Drag ended");
        state.finish();
        mutation
    }

    fn reconcile_drop(&self, board: &Board, active: &DragId, over: &DragId) -> Option<Mutation> {
        if let Some(list) = active.as_list().filter(|list| board.has_list(list)) {
            let from = board.list_index(list)?;
            let to = board.list_index(board.find_list(over)?)?;
            if from == to {
                return None;
            }
            return Some(Mutation::MoveList(array_move(&board.list_order, from, to)));
        }

        let card = active.as_card()?;
        let active_list = board.list_of_card(card)?;
        let over_list = board.find_list(over)?;
        let active_cards = &board.lists[active_list];
        let active_index = active_cards.iter().position(|c| c == card)?;
        let over_cards = &board.lists[over_list];

        let mut updated: ListMap = HashMap::new();
        if active_list == over_list {
            // Dropping on the list itself means "last in the list"
            let over_index = match over {
                DragId::Card(target) => over_cards.iter().position(|c| c == target)?,
                DragId::List(_) => over_cards.len().saturating_sub(1),
            };
            if active_index == over_index {
                return None;
            }
            updated.insert(active_list.clone(), array_move(active_cards, active_index, over_index));
        } else {
            let over_index = match over {
                DragId::Card(target) => over_cards
                    .iter()
                    .position(|c| c == target)
                    .unwrap_or(over_cards.len()),
                DragId::List(_) => over_cards.len(),
            };
            let mut source = active_cards.clone();
            source.remove(active_index);
            let mut target = over_cards.clone();
            target.insert(over_index, card.clone());
            updated.insert(active_list.clone(), source);
            updated.insert(over_list.clone(), target);
        }

        Some(Mutation::MoveCard(updated))
    }

    /// Rolls back everything since drag start
    pub fn on_drag_cancel(&self, state: &mut DragState) -> Option<Mutation> {
        let snapshot = state.snapshot.take();
        state.finish();
        debug!(restoring = snapshot.is_some(), "Drag cancelled");
        snapshot.map(Mutation::ResetLists)
    }
}
