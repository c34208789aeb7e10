//! Error types for the editor

use crate::pages::PageId;
use crate::tree::TreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Nothing is selected")]
    EmptySelection,

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Cannot delete the last remaining page")]
    LastPage,

    #[error("Invalid project document: {0}")]
    InvalidDocument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditorError {
    /// True for errors caused by stale ids or empty input rather than a
    /// broken engine. Hosts can drop these silently.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EditorError::Tree(TreeError::InvariantViolation(_)) => false,
            EditorError::Tree(_)
            | EditorError::EmptySelection
            | EditorError::EmptyClipboard
            | EditorError::PageNotFound(_)
            | EditorError::LastPage => true,
            EditorError::InvalidDocument(_)
            | EditorError::Serialization(_)
            | EditorError::Io(_) => false,
        }
    }
}
