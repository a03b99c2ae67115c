//! Board view session: the store, the drag engine and the per-frame
//! bookkeeping for one mounted board.

use crate::config::ViewConfig;
use crate::dnd::{
    ActiveDrag, CollisionArgs, CollisionDetector, DragEngine, DragEvent, DragState, DropTarget,
    Droppable, Point, Rect, RectCollisions,
};
use crate::domain::{Board, BoardId, CardId, DragId, ListId};
use crate::error::Result;
use crate::source::BoardSource;
use crate::store::{BoardStore, Mutation};
use tracing::{info, warn};

/// Clears the recently-moved flag one frame after the board changes, so
/// collision resolution never mixes fresh state with stale geometry.
#[derive(Debug, Clone, Default)]
pub struct FrameSettle {
    pending: bool,
    seen_revision: u64,
}

impl FrameSettle {
    /// Call after every store change
    pub fn board_updated(&mut self, revision: u64) {
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.pending = true;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Call once per paint. Returns true if a pending clear ran.
    pub fn on_frame(&mut self, state: &mut DragState) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        state.recently_moved = false;
        true
    }
}

/// Geometry measured for one drag frame
#[derive(Debug, Clone, PartialEq)]
pub struct DragFrame {
    pub translated_rect: Rect,
    pub pointer: Option<Point>,
    pub droppables: Vec<Droppable>,
}

/// One list as rendered, in board order
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    pub id: &'a ListId,
    pub name: &'a str,
    pub cards: &'a [CardId],
}

#[derive(Debug)]
pub enum MountOutcome<D = RectCollisions> {
    Ready(BoardView<D>),
    /// The board could not be loaded; leave for this route
    Redirect(String),
}

#[derive(Debug)]
pub struct BoardView<D = RectCollisions> {
    store: BoardStore,
    drag: DragState,
    engine: DragEngine<D>,
    settle: FrameSettle,
}

impl<D: CollisionDetector> BoardView<D> {
    pub fn new(board: Board, engine: DragEngine<D>) -> Self {
        Self {
            store: BoardStore::new(board),
            drag: DragState::default(),
            engine,
            settle: FrameSettle::default(),
        }
    }

    /// Fetches the board and builds a view for it, or says where to go instead
    pub async fn mount<S>(
        source: &S,
        board_id: &BoardId,
        auth_token: &str,
        config: &ViewConfig,
        engine: DragEngine<D>,
    ) -> MountOutcome<D>
    where
        S: BoardSource + ?Sized,
    {
        match source.fetch_board(board_id, auth_token).await {
            Ok(board) => {
                info!(board = %board_id, name = %board.name, "Mounted board view");
                MountOutcome::Ready(Self::new(board, engine))
            }
            Err(err) => {
                warn!(board = %board_id, error = %err, "No such board, leaving board view");
                MountOutcome::Redirect(config.board_list_route.clone())
            }
        }
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Lists in display order with their names and cards
    pub fn columns(&self) -> Vec<Column<'_>> {
        let board = self.store.board();
        board
            .list_order
            .iter()
            .filter_map(|id| {
                let cards = board.cards_in(id)?;
                let name = board.list_names.get(id).map(String::as_str).unwrap_or("");
                Some(Column { id, name, cards })
            })
            .collect()
    }

    pub fn drag_start(&mut self, active: impl Into<DragId>) {
        self.engine
            .on_drag_start(self.store.board(), &mut self.drag, active.into());
    }

    /// Resolves this frame's target and applies any cross-list move
    pub fn drag_over(&mut self, frame: &DragFrame) -> Result<bool> {
        let Some((active, over)) = self.resolve(frame) else {
            return Ok(false);
        };
        self.handle(DragEvent::Over { active, over })
    }

    pub fn drag_end(&mut self, frame: &DragFrame) -> Result<bool> {
        let Some((active, over)) = self.resolve(frame) else {
            return Ok(false);
        };
        self.handle(DragEvent::End { active, over })
    }

    pub fn drag_cancel(&mut self) -> Result<bool> {
        self.handle(DragEvent::Cancel)
    }

    /// Runs the engine for a raw event and applies what it asks for.
    ///
    /// `Ok(true)` when the board changed, `Ok(false)` when the engine had
    /// nothing to do. A mutation the store rejects comes back as the error
    /// and leaves the board as it was.
    pub fn handle(&mut self, event: DragEvent) -> Result<bool> {
        match self.engine.handle(self.store.board(), &mut self.drag, event) {
            Some(mutation) => self.commit(mutation).map(|_| true),
            None => Ok(false),
        }
    }

    /// Paint hook; see [`FrameSettle`]
    pub fn on_frame(&mut self) -> bool {
        self.settle.on_frame(&mut self.drag)
    }

    pub fn edit_card_description(
        &mut self,
        card: &CardId,
        description: String,
        editor: &str,
    ) -> Result<()> {
        self.commit(Mutation::EditCardDescription {
            card: card.clone(),
            description,
            editor: editor.to_string(),
        })
        .map(|_| ())
    }

    /// Appends a new, empty list and returns its id
    pub fn add_list(&mut self, name: String) -> Result<ListId> {
        let id = ListId::generate();
        self.commit(Mutation::AddList {
            id: id.clone(),
            name,
        })?;
        Ok(id)
    }

    /// Appends a new card to the end of `list` and returns its id
    pub fn add_card(&mut self, list: &ListId, name: String) -> Result<CardId> {
        let id = CardId::generate();
        self.commit(Mutation::AddCard {
            list: list.clone(),
            id: id.clone(),
            name,
        })?;
        Ok(id)
    }

    fn resolve(&mut self, frame: &DragFrame) -> Option<(ActiveDrag, Option<DropTarget>)> {
        let active_id = self.drag.active_id.clone()?;
        let args = CollisionArgs::new(frame.translated_rect, frame.pointer, &frame.droppables);

        let over = self
            .engine
            .resolve_target(self.store.board(), &mut self.drag, &args)
            .and_then(|id| args.rect_of(&id).map(|rect| DropTarget { id, rect }));

        Some((ActiveDrag::new(active_id, Some(frame.translated_rect)), over))
    }

    fn commit(&mut self, mutation: Mutation) -> Result<u64> {
        let revision = self.store.dispatch(mutation)?;
        self.settle.board_updated(revision);
        Ok(revision)
    }
}
