//! MySQL dialect.

use super::{Capabilities, Dialect};
use crate::insert::Fragments;

/// MySQL dialect.
///
/// MySQL has no RETURNING and always resolves duplicates against every unique
/// key of the table, so neither returning columns nor an explicit conflict
/// target are supported. Skipping is spelled as a no-op
/// `ON DUPLICATE KEY UPDATE` on the first column.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Capabilities for MysqlDialect {
    fn supports_insert_on_duplicate_skip(&self) -> bool {
        true
    }

    fn supports_insert_on_duplicate_update(&self) -> bool {
        true
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn insert_sql(&self, fragments: &Fragments, values_sql: &str) -> String {
        let mut sql = format!("INSERT INTO {} VALUES {values_sql}", fragments.into);

        if fragments.skip_duplicates {
            if let Some(col) = fragments.columns.first() {
                sql.push_str(&format!(" ON DUPLICATE KEY UPDATE {col} = {col}"));
            }
        } else if fragments.update_duplicates {
            sql.push_str(" ON DUPLICATE KEY UPDATE ");
            let updates: Vec<String> = fragments
                .updatable_columns
                .iter()
                .map(|col| format!("{col} = VALUES({col})"))
                .collect();
            sql.push_str(&updates.join(", "));
        }

        sql
    }
}
