//! SQL dialect support.
//!
//! Backends differ in which parts of a bulk upsert they understand and in how
//! the statement is spelled. [`Capabilities`] answers the first question and is
//! all an [`InsertRequest`](crate::InsertRequest) needs to validate itself;
//! [`Dialect`] adds quoting and the assembly of [`Fragments`] into one
//! statement.

mod generic;
mod mysql;
mod postgres;

pub use generic::GenericDialect;
pub use mysql::MysqlDialect;
pub use postgres::PostgresDialect;

use serde::{Deserialize, Serialize};

use crate::insert::Fragments;
use crate::value::SqlValue;

/// Feature probes for multi-row inserts.
///
/// Every probe defaults to `false`.
pub trait Capabilities {
    /// Whether `INSERT ... RETURNING` is available.
    fn supports_insert_returning(&self) -> bool {
        false
    }

    /// Whether conflicting rows can be skipped.
    fn supports_insert_on_duplicate_skip(&self) -> bool {
        false
    }

    /// Whether conflicting rows can be updated in place.
    fn supports_insert_on_duplicate_update(&self) -> bool {
        false
    }

    /// Whether a specific unique index can be named as the conflict target.
    fn supports_insert_conflict_target(&self) -> bool {
        false
    }
}

/// A fixed set of capability answers.
///
/// Handy for tests and for overriding what a dialect would report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilitySet {
    /// `INSERT ... RETURNING`.
    pub returning: bool,
    /// Skipping duplicates.
    pub on_duplicate_skip: bool,
    /// Updating duplicates.
    pub on_duplicate_update: bool,
    /// Explicit conflict targets.
    pub conflict_target: bool,
}

impl CapabilitySet {
    /// Everything supported.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            returning: true,
            on_duplicate_skip: true,
            on_duplicate_update: true,
            conflict_target: true,
        }
    }

    /// Nothing supported: plain multi-row inserts only.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            returning: false,
            on_duplicate_skip: false,
            on_duplicate_update: false,
            conflict_target: false,
        }
    }

    /// Snapshots the answers of another probe.
    #[must_use]
    pub fn of<C: Capabilities + ?Sized>(probe: &C) -> Self {
        Self {
            returning: probe.supports_insert_returning(),
            on_duplicate_skip: probe.supports_insert_on_duplicate_skip(),
            on_duplicate_update: probe.supports_insert_on_duplicate_update(),
            conflict_target: probe.supports_insert_conflict_target(),
        }
    }
}

impl Capabilities for CapabilitySet {
    fn supports_insert_returning(&self) -> bool {
        self.returning
    }

    fn supports_insert_on_duplicate_skip(&self) -> bool {
        self.on_duplicate_skip
    }

    fn supports_insert_on_duplicate_update(&self) -> bool {
        self.on_duplicate_update
    }

    fn supports_insert_conflict_target(&self) -> bool {
        self.conflict_target
    }
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Capabilities {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the placeholder for the `index`-th parameter (1-based).
    fn placeholder(&self, _index: usize) -> String {
        String::from("?")
    }

    /// Quotes an identifier, doubling any embedded quote character.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    /// Assembles the statement around an already rendered VALUES list.
    ///
    /// The default spelling is the `ON CONFLICT` form shared by PostgreSQL and
    /// SQLite.
    fn insert_sql(&self, fragments: &Fragments, values_sql: &str) -> String {
        let mut sql = format!("INSERT INTO {} VALUES {values_sql}", fragments.into);

        if fragments.skip_duplicates || fragments.update_duplicates {
            sql.push_str(" ON CONFLICT");
            if let Some(ref target) = fragments.conflict_target {
                sql.push(' ');
                sql.push_str(target);
            }
        }

        if fragments.skip_duplicates {
            sql.push_str(" DO NOTHING");
        } else if fragments.update_duplicates {
            sql.push_str(" DO UPDATE SET ");
            let updates: Vec<String> = fragments
                .updatable_columns
                .iter()
                .map(|col| format!("{col} = excluded.{col}"))
                .collect();
            sql.push_str(&updates.join(", "));
        }

        if let Some(ref returning) = fragments.returning {
            sql.push_str(" RETURNING ");
            sql.push_str(returning);
        }

        sql
    }

    /// Builds the statement with placeholders and returns SQL with parameters.
    fn build_insert(&self, fragments: &Fragments) -> (String, Vec<SqlValue>) {
        let (values_sql, params) = fragments
            .values
            .to_sql_placeholders(|index| self.placeholder(index));
        (self.insert_sql(fragments, &values_sql), params)
    }

    /// Renders a binary value as a literal. Defaults to `X'..'` hex.
    fn blob_literal(&self, bytes: &[u8]) -> String {
        SqlValue::Blob(bytes.to_vec()).to_sql_inline()
    }

    /// Renders one value as an escaped literal.
    fn literal(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Blob(bytes) => self.blob_literal(bytes),
            other => other.to_sql_inline(),
        }
    }

    /// Builds the statement with every value inlined as an escaped literal.
    fn build_insert_sql(&self, fragments: &Fragments) -> String {
        let values_sql = fragments
            .values
            .to_sql_literals(|value| self.literal(value));
        self.insert_sql(fragments, &values_sql)
    }
}
