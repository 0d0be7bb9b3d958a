//! Error types for the notelink pipeline.

use thiserror::Error;

/// Result type alias using notelink's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notelink operations.
///
/// Note that the unfurl pipeline itself is designed to degrade rather than
/// fail: `Unfurler::fetch` converts every error into fallback metadata, so
/// these variants mostly travel inside the unfurl crate and across the
/// `NoteStore` persistence boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Upstream returned a payload we could not interpret
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Persisting a note failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
