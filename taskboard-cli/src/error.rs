//! Error type for CLI commands

use taskboard::{BoardError, Notice};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The board refused or failed an interaction
    #[error("{0}")]
    Notice(Notice),

    /// Notices were shown during an interactive session
    #[error("{0} notice(s) emitted during session")]
    SessionNotices(usize),

    #[error("{0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<taskboard::ApiError> for CliError {
    fn from(e: taskboard::ApiError) -> Self {
        Self::Board(e.into())
    }
}
