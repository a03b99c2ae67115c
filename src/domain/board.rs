use crate::domain::{
    card::Card,
    ids::{BoardId, CardId, DragId, ListId},
};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// List id → ordered card ids. Insertion order is display order.
pub type ListMap = HashMap<ListId, Vec<CardId>>;

/// Copy of a board's list mapping taken before a drag, used to roll it back
pub type ListSnapshot = ListMap;

/// Kanban board state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub list_order: Vec<ListId>,
    pub lists: ListMap,
    #[serde(default)]
    pub list_names: HashMap<ListId, String>,
    #[serde(default)]
    pub cards: HashMap<CardId, Card>,
}

impl Board {
    pub fn new(id: BoardId, name: String) -> Self {
        Self {
            id,
            name,
            list_order: Vec::new(),
            lists: HashMap::new(),
            list_names: HashMap::new(),
            cards: HashMap::new(),
        }
    }

    /// Appends a new, empty list at the end of the board
    pub fn add_list(&mut self, id: ListId, name: String) -> Result<()> {
        if self.has_list(&id) {
            return Err(BoardError::InvariantViolation(format!(
                "list {} already exists",
                id
            )));
        }
        self.list_order.push(id.clone());
        self.lists.insert(id.clone(), Vec::new());
        self.list_names.insert(id, name);
        Ok(())
    }

    /// Appends a new card to the end of `list`
    pub fn add_card(&mut self, list: &ListId, id: CardId, name: String) -> Result<()> {
        if self.cards.contains_key(&id) || self.list_of_card(&id).is_some() {
            return Err(BoardError::InvariantViolation(format!(
                "card {} already exists",
                id
            )));
        }
        let cards = self
            .lists
            .get_mut(list)
            .ok_or_else(|| BoardError::ListNotFound(list.to_string()))?;

        cards.push(id.clone());
        self.cards.insert(id.clone(), Card::new(id, name));
        Ok(())
    }

    pub fn has_list(&self, id: &ListId) -> bool {
        self.lists.contains_key(id)
    }

    /// True when `id` names a list on this board
    pub fn is_list(&self, id: &DragId) -> bool {
        id.as_list().is_some_and(|list| self.has_list(list))
    }

    /// Cards of a list, in display order
    pub fn cards_in(&self, list: &ListId) -> Option<&[CardId]> {
        self.lists.get(list).map(Vec::as_slice)
    }

    /// The list a drag id belongs to: the id itself when it names a list,
    /// otherwise the list holding the card.
    pub fn find_list(&self, id: &DragId) -> Option<&ListId> {
        match id {
            DragId::List(list) => self.lists.get_key_value(list).map(|(key, _)| key),
            DragId::Card(card) => self.list_of_card(card),
        }
    }

    pub fn list_of_card(&self, card: &CardId) -> Option<&ListId> {
        self.lists
            .iter()
            .find(|(_, cards)| cards.contains(card))
            .map(|(list, _)| list)
    }

    pub fn list_index(&self, list: &ListId) -> Option<usize> {
        self.list_order.iter().position(|l| l == list)
    }

    /// Checks the structural invariants: every card sits in exactly one
    /// list, and `list_order` is a duplicate-free permutation of the lists.
    pub fn validate(&self) -> Result<()> {
        let mut seen_lists = HashSet::new();
        for list in &self.list_order {
            if !seen_lists.insert(list) {
                return Err(BoardError::InvariantViolation(format!(
                    "list {} appears twice in the list order",
                    list
                )));
            }
            if !self.lists.contains_key(list) {
                return Err(BoardError::InvariantViolation(format!(
                    "list {} is ordered but has no card sequence",
                    list
                )));
            }
        }
        if seen_lists.len() != self.lists.len() {
            return Err(BoardError::InvariantViolation(
                "list order does not cover every list".to_string(),
            ));
        }

        let mut seen_cards = HashSet::new();
        for (list, cards) in &self.lists {
            for card in cards {
                if !seen_cards.insert(card) {
                    return Err(BoardError::InvariantViolation(format!(
                        "card {} appears more than once (last seen in list {})",
                        card, list
                    )));
                }
            }
        }

        // Card records must belong to some list
        if let Some(orphan) = self.cards.keys().find(|card| !seen_cards.contains(card)) {
            return Err(BoardError::InvariantViolation(format!(
                "card {} is not in any list",
                orphan
            )));
        }

        Ok(())
    }

    /// Total number of card placements across all lists
    pub fn card_count(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }
}

/// Moves the element at `from` to `to`, shifting everything in between.
///
/// Out-of-range indices leave the slice untouched.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() || to >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to, item);
    moved
}
