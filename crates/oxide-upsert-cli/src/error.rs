//! Error types for the command-line tool.

use std::path::PathBuf;

use oxide_upsert_core::InsertError;
use oxide_upsert_sqlite::ExecuteError;

/// Errors that can occur while loading input or running an insert.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("IO error reading '{path}': {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// An input file is not valid JSON or does not match the expected shape.
    #[error("Failed to parse '{path}': {source}")]
    Json {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// An entry of the rows file is not a JSON object.
    #[error("Row {index} in '{path}' is not a JSON object")]
    NotAnObject {
        /// Path of the rows file.
        path: PathBuf,
        /// Zero-based position of the entry.
        index: usize,
    },

    /// The request was rejected or could not be rendered.
    #[error(transparent)]
    Insert(#[from] InsertError),

    /// The insert failed on the database.
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
