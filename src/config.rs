use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Settings for the board view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Route to leave for when a board cannot be loaded
    pub board_list_route: String,
    /// Directory, relative to the source root, holding board JSON files
    pub boards_dir: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            board_list_route: "/b".to_string(),
            boards_dir: "boards".to_string(),
        }
    }
}

impl ViewConfig {
    /// Loads a config from a JSON file. Missing keys take their defaults.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).await?;
        let config: ViewConfig = serde_json::from_str(&contents)
            .map_err(|e| BoardError::ConfigError(format!("{}: {}", path.display(), e)))?;

        if config.board_list_route.is_empty() {
            return Err(BoardError::ConfigError(
                "board_list_route must not be empty".to_string(),
            ));
        }
        Ok(config)
    }
}
