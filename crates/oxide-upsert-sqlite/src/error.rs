//! Error types for executing bulk inserts on SQLite.

use oxide_upsert_core::InsertError;
use thiserror::Error;

/// Errors raised while building or running a bulk insert.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The request could not be rendered.
    #[error(transparent)]
    Insert(#[from] InsertError),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type alias for SQLite bulk inserts.
pub type Result<T> = std::result::Result<T, ExecuteError>;
