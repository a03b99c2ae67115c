use crate::domain::ids::CardId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text shown on the card detail button when no description is set
pub const DESCRIPTION_PLACEHOLDER: &str = "Details";

/// A kanban card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<String>,
}

impl Card {
    /// Creates a new card with the given ID and name
    pub fn new(id: CardId, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description: None,
            created_at: now,
            updated_at: now,
            last_edited_by: None,
        }
    }

    /// Sets the description on behalf of `editor`.
    ///
    /// Blank text clears the description so the placeholder shows again.
    pub fn set_description(&mut self, description: String, editor: &str) {
        let trimmed = description.trim();
        self.description = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.last_edited_by = Some(editor.to_string());
        self.updated_at = Utc::now();
    }

    /// Text for the detail button: the description or a placeholder
    pub fn description_or_placeholder(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or(DESCRIPTION_PLACEHOLDER)
    }
}
