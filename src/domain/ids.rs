use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Creates a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            /// Returns the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a board, as used in the board route (`/b/{id}`)
    BoardId
);
string_id!(
    /// Identifier of a list (a column on the board)
    ListId
);
string_id!(
    /// Identifier of a card
    CardId
);

impl FromStr for BoardId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Board ids double as file stems, so keep them to a safe charset
        let valid = !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(BoardError::InvalidBoardId(s.to_string()))
        }
    }
}

/// Anything that can be dragged or dropped onto: a whole list or a single card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DragId {
    List(ListId),
    Card(CardId),
}

impl DragId {
    pub fn as_list(&self) -> Option<&ListId> {
        match self {
            Self::List(id) => Some(id),
            Self::Card(_) => None,
        }
    }

    pub fn as_card(&self) -> Option<&CardId> {
        match self {
            Self::Card(id) => Some(id),
            Self::List(_) => None,
        }
    }
}

impl From<ListId> for DragId {
    fn from(id: ListId) -> Self {
        Self::List(id)
    }
}

impl From<CardId> for DragId {
    fn from(id: CardId) -> Self {
        Self::Card(id)
    }
}

impl fmt::Display for DragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(id) => write!(f, "list:{}", id),
            Self::Card(id) => write!(f, "card:{}", id),
        }
    }
}
