use crate::{
    domain::{Board, BoardId},
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "file-source")]
pub mod file_source;

#[cfg(feature = "file-source")]
pub use file_source::FileBoardSource;

/// Where boards come from. The view fetches once per mount.
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// Fetches a board on behalf of the holder of `auth_token`
    async fn fetch_board(&self, board_id: &BoardId, auth_token: &str) -> Result<Board>;
}
