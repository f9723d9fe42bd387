//! Common error types for fileproc

use thiserror::Error;

/// Common result type for fileproc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the processing loop and the database layer
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not valid UTF-8 text
    #[error("Decode error: {0}")]
    Decode(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
