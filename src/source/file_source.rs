use crate::{
    config::ViewConfig,
    domain::{Board, BoardId},
    error::{BoardError, Result},
    source::BoardSource,
};
use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tokio::fs;
use tracing::debug;

/// Boards stored as `<root>/<boards_dir>/<id>.json`
pub struct FileBoardSource {
    boards_dir: PathBuf,
}

impl FileBoardSource {
    pub fn new(root: impl AsRef<Path>, config: &ViewConfig) -> Self {
        Self {
            boards_dir: root.as_ref().join(&config.boards_dir),
        }
    }

    fn board_file(&self, id: &BoardId) -> PathBuf {
        self.boards_dir.join(format!("{}.json", id.as_str()))
    }

    /// Writes a board, creating the boards directory if needed
    pub async fn save_board(&self, board: &Board) -> Result<()> {
        // Reject ids that could escape the boards directory
        let id = BoardId::from_str(board.id.as_str())?;
        board.validate()?;
        if !self.boards_dir.exists() {
            fs::create_dir_all(&self.boards_dir).await?;
        }

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(&id), json).await?;
        Ok(())
    }
}

#[async_trait]
impl BoardSource for FileBoardSource {
    async fn fetch_board(&self, board_id: &BoardId, auth_token: &str) -> Result<Board> {
        if auth_token.trim().is_empty() {
            return Err(BoardError::Unauthorized);
        }
        // Reject ids that could escape the boards directory
        let id = BoardId::from_str(board_id.as_str())?;

        let file_path = self.board_file(&id);
        if !file_path.exists() {
            return Err(BoardError::BoardNotFound(id.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let board: Board = serde_json::from_str(&contents)?;
        board.validate()?;

        debug!(board = %id, lists = board.list_order.len(), "Loaded board from file");
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, CardId, ListId};
    use tempfile::TempDir;

    fn sample_board(id: &str) -> Board {
        let mut board = Board::new(BoardId::new(id), "Sprint".to_string());
        let todo = ListId::generate();
        board.add_list(todo.clone(), "Todo".to_string()).unwrap();
        board
            .add_card(&todo, CardId::generate(), "Write tests".to_string())
            .unwrap();
        board.add_list(ListId::generate(), "Done".to_string()).unwrap();
        board
    }

    #[tokio::test]
    async fn test_board_save_and_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileBoardSource::new(temp_dir.path(), &ViewConfig::default());

        let board = sample_board("b1");
        source.save_board(&board).await.unwrap();

        let loaded = source.fetch_board(&board.id, "token").await.unwrap();
        assert_eq!(loaded, board);
    }

    #[tokio::test]
    async fn test_fetch_missing_board() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileBoardSource::new(temp_dir.path(), &ViewConfig::default());

        let result = source.fetch_board(&BoardId::new("nope"), "token").await;
        assert!(matches!(result, Err(BoardError::BoardNotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_requires_token() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileBoardSource::new(temp_dir.path(), &ViewConfig::default());
        source.save_board(&sample_board("b1")).await.unwrap();

        let result = source.fetch_board(&BoardId::new("b1"), "  ").await;
        assert!(matches!(result, Err(BoardError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_fetch_rejects_path_like_ids() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileBoardSource::new(temp_dir.path(), &ViewConfig::default());

        let result = source.fetch_board(&BoardId::new("../secret"), "token").await;
        assert!(matches!(result, Err(BoardError::InvalidBoardId(_))));
    }

    #[tokio::test]
    async fn test_fetch_rejects_inconsistent_board() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileBoardSource::new(temp_dir.path(), &ViewConfig::default());
        let dir = temp_dir.path().join("boards");
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let json = serde_json::json!({
            "id": "bad",
            "name": "Broken",
            "list_order": ["A", "B"],
            "lists": { "A": ["x"], "B": ["x"] }
        });
        tokio::fs::write(dir.join("bad.json"), json.to_string())
            .await
            .unwrap();

        let result = source.fetch_board(&BoardId::new("bad"), "token").await;
        assert!(matches!(result, Err(BoardError::InvariantViolation(_))));
    }

    #[tokio::test]
    async fn test_save_rejects_path_like_ids() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let source = FileBoardSource::new(&nested, &ViewConfig::default());

        let board = sample_board("../../escaped");
        let result = source.save_board(&board).await;

        assert!(matches!(result, Err(BoardError::InvalidBoardId(_))));
        assert!(!nested.join("escaped.json").exists());
        assert!(!temp_dir.path().join("a").join("escaped.json").exists());
    }

    #[tokio::test]
    async fn test_fetch_rejects_orphan_card_record() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileBoardSource::new(temp_dir.path(), &ViewConfig::default());
        let dir = temp_dir.path().join("boards");
        tokio::fs::create_dir_all(&dir).await.unwrap();

        let orphan = Card::new(CardId::new("q"), "Lost".to_string());
        let json = serde_json::json!({
            "id": "orphan",
            "name": "Broken",
            "list_order": ["A"],
            "lists": { "A": [] },
            "cards": { "q": orphan }
        });
        tokio::fs::write(dir.join("orphan.json"), json.to_string())
            .await
            .unwrap();

        let result = source.fetch_board(&BoardId::new("orphan"), "token").await;
        assert!(matches!(result, Err(BoardError::InvariantViolation(_))));
    }

    #[tokio::test]
    async fn test_custom_boards_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = ViewConfig {
            boards_dir: "data".to_string(),
            ..ViewConfig::default()
        };
        let source = FileBoardSource::new(temp_dir.path(), &config);

        let board = sample_board("b1");
        source.save_board(&board).await.unwrap();

        assert!(temp_dir.path().join("data").join("b1.json").exists());
        assert_eq!(source.fetch_board(&board.id, "token").await.unwrap(), board);
    }
}
