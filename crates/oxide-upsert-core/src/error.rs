//! Error types for bulk insert requests.

use thiserror::Error;

/// Why a bulk insert could not be built.
///
/// Every variant except [`InsertError::RowKeyMismatch`] is raised while the
/// request is constructed; key mismatches surface when the values list is
/// rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// No rows were supplied.
    #[error("empty list of rows passed to bulk insert")]
    EmptyBatch,

    /// RETURNING was requested but the backend cannot honor it.
    #[error("backend does not support RETURNING on insert")]
    UnsupportedReturning,

    /// The on-duplicate policy name is not one of raise, skip or update.
    #[error("unsupported on_duplicate value: {0:?}")]
    UnsupportedOnDuplicateValue(String),

    /// Skipping duplicates was requested but the backend cannot do it.
    #[error("backend does not support skipping duplicates")]
    UnsupportedSkip,

    /// Updating duplicates was requested but the backend cannot do it.
    #[error("backend does not support updating duplicates")]
    UnsupportedUpdate,

    /// A unique index was chosen but the backend has no conflict targets.
    #[error("backend does not support an explicit conflict target")]
    UnsupportedConflictTarget,

    /// The chosen unique index does not exist on the table.
    #[error("no unique index found for {0}")]
    UnknownIndex(String),

    /// A row's columns differ from the first row's columns.
    #[error("all rows must have the same keys: row {row} has {found:?}, expected {expected:?}")]
    RowKeyMismatch {
        /// Zero-based position of the offending row.
        row: usize,
        /// Keys of the first row.
        expected: Vec<String>,
        /// Keys of the offending row.
        found: Vec<String>,
    },
}

/// Result type for bulk insert operations.
pub type Result<T> = std::result::Result<T, InsertError>;
