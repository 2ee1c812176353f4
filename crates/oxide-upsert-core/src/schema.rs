//! Table metadata consumed by bulk inserts.
//!
//! A [`TableSchema`] is the resolved view of one table: its column types,
//! primary key, read-only columns and unique-index catalog. It is supplied by
//! the caller (or loaded from JSON) and only ever read here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Declared type of a column, used to cast raw row values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Whole numbers.
    Integer,
    /// Floating point numbers.
    Float,
    /// Character data.
    Text,
    /// True/false.
    Boolean,
    /// Raw bytes.
    Blob,
    /// JSON documents, bound as text.
    Json,
    /// Date and time, bound as `YYYY-MM-DD HH:MM:SS[.fff]` text in UTC.
    Timestamp,
    /// Calendar date, bound as `YYYY-MM-DD` text.
    Date,
}

/// A column of a [`TableSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

/// A unique index, possibly partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueIndex {
    /// Index name.
    pub name: String,
    /// Indexed columns, in index order.
    pub columns: Vec<String>,
    /// Predicate of a partial index (SQL boolean expression).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
}

impl UniqueIndex {
    /// Creates a unique index over `columns`.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            predicate: None,
        }
    }

    /// Makes this a partial index restricted by `predicate`.
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    /// Returns `true` if `column` is part of this index.
    #[must_use]
    pub fn covers(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Resolved metadata for a single table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    name: String,
    #[serde(default)]
    columns: Vec<ColumnDef>,
    #[serde(default)]
    primary_key: Vec<String>,
    #[serde(default)]
    readonly_columns: Vec<String>,
    #[serde(default)]
    indexes: Vec<UniqueIndex>,
}

impl TableSchema {
    /// Creates an empty schema for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
            readonly_columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, ty: ColumnType) -> Self {
        self.columns.push(ColumnDef {
            name: name.into(),
            ty,
        });
        self
    }

    /// Sets the primary-key columns.
    #[must_use]
    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = columns.iter().map(|c| String::from(*c)).collect();
        self
    }

    /// Declares columns that must never be written by an update.
    #[must_use]
    pub fn readonly(mut self, columns: &[&str]) -> Self {
        self.readonly_columns
            .extend(columns.iter().map(|c| String::from(*c)));
        self
    }

    /// Adds a unique index to the catalog.
    #[must_use]
    pub fn index(mut self, index: UniqueIndex) -> Self {
        self.indexes.push(index);
        self
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column definitions in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Primary-key columns.
    #[must_use]
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_key
    }

    /// Columns declared read-only.
    #[must_use]
    pub fn readonly_columns(&self) -> &[String] {
        &self.readonly_columns
    }

    /// The unique-index catalog.
    #[must_use]
    pub fn indexes(&self) -> &[UniqueIndex] {
        &self.indexes
    }

    /// Looks up a unique index by exact name.
    #[must_use]
    pub fn find_index(&self, name: &str) -> Option<&UniqueIndex> {
        self.indexes.iter().find(|index| index.name == name)
    }

    /// Looks up a unique index by its exact, ordered column list.
    #[must_use]
    pub fn find_index_by_columns<S: AsRef<str>>(&self, columns: &[S]) -> Option<&UniqueIndex> {
        self.indexes.iter().find(|index| {
            index.columns.len() == columns.len()
                && index
                    .columns
                    .iter()
                    .zip(columns)
                    .all(|(a, b)| a == b.as_ref())
        })
    }

    /// Declared type of `column`, if the column is known.
    #[must_use]
    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.ty)
    }

    /// Column name to declared type, for every known column.
    #[must_use]
    pub fn column_types(&self) -> HashMap<&str, ColumnType> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.ty))
            .collect()
    }

    /// Returns `true` if `column` is part of the primary key or read-only.
    #[must_use]
    pub fn is_readonly(&self, column: &str) -> bool {
        self.primary_key.iter().any(|c| c == column)
            || self.readonly_columns.iter().any(|c| c == column)
    }
}
