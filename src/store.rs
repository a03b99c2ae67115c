use crate::domain::{Board, CardId, ListId, ListMap, ListSnapshot};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// A change request against the board store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutation {
    /// Replace the card sequences of the named lists in one step
    MoveCard(ListMap),
    /// Replace the list order
    MoveList(Vec<ListId>),
    /// Restore every list to a pre-drag snapshot
    #[serde(rename = "RESET_LIST")]
    ResetLists(ListSnapshot),
    EditCardDescription {
        card: CardId,
        description: String,
        editor: String,
    },
    /// Append an empty list to the board
    AddList { id: ListId, name: String },
    /// Append a new card to the end of a list
    AddCard {
        list: ListId,
        id: CardId,
        name: String,
    },
}

impl Mutation {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MoveCard(_) => "MOVE_CARD",
            Self::MoveList(_) => "MOVE_LIST",
            Self::ResetLists(_) => "RESET_LIST",
            Self::EditCardDescription { .. } => "EDIT_CARD_DESCRIPTION",
            Self::AddList { .. } => "ADD_LIST",
            Self::AddCard { .. } => "ADD_CARD",
        }
    }
}

/// Single-writer owner of a board. All changes go through [`BoardStore::dispatch`].
#[derive(Debug)]
pub struct BoardStore {
    board: Board,
    revision: u64,
}

impl BoardStore {
    pub fn new(board: Board) -> Self {
        Self { board, revision: 0 }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of mutations applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Applies one mutation atomically and returns the new revision.
    ///
    /// The result is validated before it replaces the current board; a
    /// mutation that would break an invariant leaves the board untouched.
    pub fn dispatch(&mut self, mutation: Mutation) -> Result<u64> {
        let kind = mutation.kind();
        let rearranges_only = matches!(mutation, Mutation::MoveCard(_));
        let mut next = self.board.clone();

        if let Err(err) =
            apply(&mut next, mutation).and_then(|_| check(&self.board, &next, rearranges_only))
        {
            warn!(board = %self.board.id, mutation = kind, error = %err, "Rejected board mutation");
            return Err(err);
        }

        self.board = next;
        self.revision += 1;
        info!(board = %self.board.id, mutation = kind, revision = self.revision, "Applied board mutation");
        Ok(self.revision)
    }
}

fn apply(board: &mut Board, mutation: Mutation) -> Result<()> {
    match mutation {
        Mutation::MoveCard(updated) => {
            for (list, cards) in updated {
                let slot = board
                    .lists
                    .get_mut(&list)
                    .ok_or_else(|| BoardError::ListNotFound(list.to_string()))?;
                *slot = cards;
            }
        }
        Mutation::MoveList(order) => board.list_order = order,
        Mutation::ResetLists(snapshot) => board.lists = snapshot,
        Mutation::EditCardDescription {
            card,
            description,
            editor,
        } => {
            board
                .cards
                .get_mut(&card)
                .ok_or_else(|| BoardError::CardNotFound(card.to_string()))?
                .set_description(description, &editor);
        }
        Mutation::AddList { id, name } => board.add_list(id, name)?,
        Mutation::AddCard { list, id, name } => board.add_card(&list, id, name)?,
    }
    Ok(())
}

fn check(before: &Board, after: &Board, rearranges_only: bool) -> Result<()> {
    after.validate()?;

    // Moves only rearrange; the set of placed cards must not change
    if rearranges_only && placed_cards(before) != placed_cards(after) {
        return Err(BoardError::InvariantViolation(
            "card move would drop or introduce cards".to_string(),
        ));
    }
    Ok(())
}

fn placed_cards(board: &Board) -> HashSet<&CardId> {
    board.lists.values().flatten().collect()
}

/// A [`BoardStore`] behind a per-board async mutex, for hosts that touch
/// the board from more than one task.
#[derive(Debug, Clone)]
pub struct SharedBoardStore {
    inner: Arc<Mutex<BoardStore>>,
}

impl SharedBoardStore {
    pub fn new(store: BoardStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn dispatch(&self, mutation: Mutation) -> Result<u64> {
        self.inner.lock().await.dispatch(mutation)
    }

    /// Copy of the current board
    pub async fn board(&self) -> Board {
        self.inner.lock().await.board().clone()
    }

    /// Runs a read-then-mutate sequence while holding the board lock
    pub async fn with_store<R>(&self, f: impl FnOnce(&mut BoardStore) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}
