//! Error types for georemind.

use thiserror::Error;

/// Main error type for georemind operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error.
    #[error("SQLite error: {0}")]
    SQLite(#[from] rusqlite::Error),

    /// Storage backend failure (lock poisoning, corrupt rows).
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reminder not found.
    #[error("Reminder not found: {0}")]
    NotFound(String),

    /// A blocking store task could not complete.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<crate::sqlite::Error> for Error {
    fn from(err: crate::sqlite::Error) -> Self {
        match err {
            crate::sqlite::Error::Sqlite(e) => Error::SQLite(e),
            e @ (crate::sqlite::Error::UnpairedCoordinates(_)
            | crate::sqlite::Error::NonFiniteCoordinates(_)) => Error::InvalidInput(e.to_string()),
            e @ crate::sqlite::Error::LockPoisoned(_) => Error::Storage(e.to_string()),
        }
    }
}
