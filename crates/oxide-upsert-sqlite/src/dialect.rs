//! SQLite dialect implementation.

use oxide_upsert_core::dialect::{Capabilities, Dialect};

/// SQLite dialect.
///
/// Uses the `ON CONFLICT` upsert syntax (SQLite 3.24.0+) and `RETURNING`
/// (SQLite 3.35.0+).
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Capabilities for SqliteDialect {
    fn supports_insert_returning(&self) -> bool {
        true // SQLite 3.35.0+
    }

    fn supports_insert_on_duplicate_skip(&self) -> bool {
        true // SQLite 3.24.0+
    }

    fn supports_insert_on_duplicate_update(&self) -> bool {
        true // SQLite 3.24.0+
    }

    fn supports_insert_conflict_target(&self) -> bool {
        true
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identifier_quote(&self) -> char {
        '"' // SQLite also accepts backticks, but double quotes are standard
    }
}
