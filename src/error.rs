//! Error taxonomy for snippet operations.
//!
//! Every core operation returns [`Result<T>`]; nothing is swallowed or
//! retried. The CLI maps each variant to its own exit code so callers can
//! tell bad input apart from environment failures.

use thiserror::Error;

/// Errors produced by the parser, store, index, and services.
#[derive(Error, Debug)]
pub enum SnippetError {
    /// Caller-supplied input is structurally invalid. No state was committed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced file or index row does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Index backing store unreachable or corrupt.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for snippet operations.
pub type Result<T> = std::result::Result<T, SnippetError>;

impl From<sqlx::Error> for SnippetError {
    fn from(err: sqlx::Error) -> Self {
        SnippetError::Storage(err.to_string())
    }
}

impl SnippetError {
    pub fn validation(msg: impl Into<String>) -> Self {
        SnippetError::Validation(msg.into())
    }

    /// Process exit code used by the `snip` binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            SnippetError::Validation(_) => 2,
            SnippetError::NotFound(_) => 3,
            SnippetError::Io(_) => 4,
            SnippetError::Storage(_) => 5,
        }
    }
}
