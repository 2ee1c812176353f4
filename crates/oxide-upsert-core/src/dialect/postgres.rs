//! PostgreSQL dialect.

use super::{Capabilities, Dialect};

/// PostgreSQL dialect.
///
/// `INSERT ... ON CONFLICT [target] DO NOTHING | DO UPDATE SET ...` with
/// `RETURNING` and numbered `$n` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Capabilities for PostgresDialect {
    fn supports_insert_returning(&self) -> bool {
        true
    }

    fn supports_insert_on_duplicate_skip(&self) -> bool {
        true
    }

    fn supports_insert_on_duplicate_update(&self) -> bool {
        true
    }

    fn supports_insert_conflict_target(&self) -> bool {
        true
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }

    // `X'..'` is a bit string in PostgreSQL
    fn blob_literal(&self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
        format!("'\\x{hex}'::bytea")
    }
}
