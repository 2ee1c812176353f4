//! Validated bulk insert requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::Capabilities;
use crate::error::{InsertError, Result};
use crate::schema::{TableSchema, UniqueIndex};
use crate::value::Row;

/// What to do with a row that collides with an existing unique key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnDuplicate {
    /// Fail the whole statement.
    #[default]
    Raise,
    /// Drop the conflicting row.
    Skip,
    /// Overwrite the non-key columns of the existing row.
    Update,
}

impl OnDuplicate {
    /// Lowercase name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raise => "raise",
            Self::Skip => "skip",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for OnDuplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnDuplicate {
    type Err = InsertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "raise" => Ok(Self::Raise),
            "skip" => Ok(Self::Skip),
            "update" => Ok(Self::Update),
            _ => Err(InsertError::UnsupportedOnDuplicateValue(s.to_string())),
        }
    }
}

/// Which columns the statement should return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Returning {
    /// The primary key, if the backend can return anything at all.
    #[default]
    Default,
    /// No RETURNING clause.
    None,
    /// Exactly these columns. An empty list means no RETURNING clause.
    Columns(Vec<String>),
}

impl Returning {
    /// Returns the given columns.
    #[must_use]
    pub fn columns(columns: &[&str]) -> Self {
        Self::Columns(columns.iter().map(|c| String::from(*c)).collect())
    }
}

/// How the conflict-target index is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueBy {
    /// By index name.
    Name(String),
    /// By the index's exact, ordered column list.
    Columns(Vec<String>),
}

impl fmt::Display for UniqueBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Columns(columns) => write!(f, "({})", columns.join(", ")),
        }
    }
}

#[derive(Debug, Clone)]
enum PolicyInput {
    Known(OnDuplicate),
    Named(String),
}

impl PolicyInput {
    fn resolve(&self) -> Result<OnDuplicate> {
        match self {
            Self::Known(policy) => Ok(*policy),
            Self::Named(name) => name.parse(),
        }
    }
}

/// Collects the inputs of an [`InsertRequest`].
#[derive(Debug, Clone)]
pub struct InsertRequestBuilder<'a> {
    table: &'a TableSchema,
    rows: Vec<Row>,
    on_duplicate: PolicyInput,
    returning: Returning,
    unique_by: Option<UniqueBy>,
}

impl<'a> InsertRequestBuilder<'a> {
    /// Sets the on-duplicate policy.
    #[must_use]
    pub fn on_duplicate(mut self, policy: OnDuplicate) -> Self {
        self.on_duplicate = PolicyInput::Known(policy);
        self
    }

    /// Sets the on-duplicate policy by name (`raise`, `skip` or `update`).
    ///
    /// Unknown names fail when the request is built.
    #[must_use]
    pub fn on_duplicate_named(mut self, name: impl Into<String>) -> Self {
        self.on_duplicate = PolicyInput::Named(name.into());
        self
    }

    /// Sets the returning selection.
    #[must_use]
    pub fn returning(mut self, returning: Returning) -> Self {
        self.returning = returning;
        self
    }

    /// Targets conflicts on the unique index called `name`.
    #[must_use]
    pub fn unique_by(mut self, name: impl Into<String>) -> Self {
        self.unique_by = Some(UniqueBy::Name(name.into()));
        self
    }

    /// Targets conflicts on the unique index over exactly `columns`.
    #[must_use]
    pub fn unique_by_columns(mut self, columns: &[&str]) -> Self {
        self.unique_by = Some(UniqueBy::Columns(
            columns.iter().map(|c| String::from(*c)).collect(),
        ));
        self
    }

    /// Validates the request against the backend's capabilities.
    ///
    /// Checks run in a fixed order and the first failure wins: empty batch,
    /// unknown index, then returning, policy value, skip, update and conflict
    /// target support.
    pub fn build<C: Capabilities + ?Sized>(self, capabilities: &C) -> Result<InsertRequest<'a>> {
        let Some(first) = self.rows.first() else {
            return Err(InsertError::EmptyBatch);
        };
        let keys: Vec<String> = first.keys().map(String::from).collect();

        let returning = match self.returning {
            Returning::Default if capabilities.supports_insert_returning() => {
                Some(self.table.primary_keys().to_vec())
            }
            Returning::Default | Returning::None => None,
            Returning::Columns(columns) => Some(columns),
        }
        .filter(|columns| !columns.is_empty());

        let unique_index = match self.unique_by {
            Some(ref by) => {
                let found = match by {
                    UniqueBy::Name(name) => self.table.find_index(name),
                    UniqueBy::Columns(columns) => self.table.find_index_by_columns(columns),
                };
                Some(found.ok_or_else(|| InsertError::UnknownIndex(by.to_string()))?)
            }
            None => None,
        };

        let updatable_columns: Vec<String> = keys
            .iter()
            .filter(|key| !self.table.is_readonly(key))
            .filter(|key| !unique_index.is_some_and(|index| index.covers(key)))
            .cloned()
            .collect();

        let on_duplicate = self.on_duplicate.resolve().map(|policy| {
            if policy == OnDuplicate::Update && updatable_columns.is_empty() {
                debug!(
                    table = %self.table.name(),
                    "nothing to update, skipping duplicates instead"
                );
                OnDuplicate::Skip
            } else {
                policy
            }
        });

        if returning.is_some() && !capabilities.supports_insert_returning() {
            return Err(InsertError::UnsupportedReturning);
        }
        let on_duplicate = on_duplicate?;
        if on_duplicate == OnDuplicate::Skip && !capabilities.supports_insert_on_duplicate_skip() {
            return Err(InsertError::UnsupportedSkip);
        }
        if on_duplicate == OnDuplicate::Update
            && !capabilities.supports_insert_on_duplicate_update()
        {
            return Err(InsertError::UnsupportedUpdate);
        }
        if unique_index.is_some() && !capabilities.supports_insert_conflict_target() {
            return Err(InsertError::UnsupportedConflictTarget);
        }

        Ok(InsertRequest {
            table: self.table,
            rows: self.rows,
            keys,
            on_duplicate,
            returning,
            unique_index,
            updatable_columns,
        })
    }
}

/// A validated, immutable multi-row insert.
///
/// Built once per bulk operation and handed to a
/// [`StatementBuilder`](crate::StatementBuilder).
#[derive(Debug, Clone)]
pub struct InsertRequest<'a> {
    table: &'a TableSchema,
    rows: Vec<Row>,
    keys: Vec<String>,
    on_duplicate: OnDuplicate,
    returning: Option<Vec<String>>,
    unique_index: Option<&'a UniqueIndex>,
    updatable_columns: Vec<String>,
}

impl<'a> InsertRequest<'a> {
    /// Starts a request inserting `rows` into `table`.
    ///
    /// Defaults: [`OnDuplicate::Raise`], [`Returning::Default`], no unique
    /// index.
    #[must_use]
    pub fn builder(table: &'a TableSchema, rows: Vec<Row>) -> InsertRequestBuilder<'a> {
        InsertRequestBuilder {
            table,
            rows,
            on_duplicate: PolicyInput::Known(OnDuplicate::Raise),
            returning: Returning::Default,
            unique_by: None,
        }
    }

    /// Target table.
    #[must_use]
    pub const fn table(&self) -> &'a TableSchema {
        self.table
    }

    /// The row batch, in statement order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column names of the first row, in first-row order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Effective on-duplicate policy.
    #[must_use]
    pub const fn on_duplicate(&self) -> OnDuplicate {
        self.on_duplicate
    }

    /// Effective returning columns, `None` when returning is disabled.
    #[must_use]
    pub fn returning(&self) -> Option<&[String]> {
        self.returning.as_deref()
    }

    /// The resolved conflict-target index.
    #[must_use]
    pub const fn unique_index(&self) -> Option<&'a UniqueIndex> {
        self.unique_index
    }

    /// Columns overwritten when a duplicate is updated.
    #[must_use]
    pub fn updatable_columns(&self) -> &[String] {
        &self.updatable_columns
    }

    /// Primary-key columns of the table.
    #[must_use]
    pub fn primary_keys(&self) -> &'a [String] {
        self.table.primary_keys()
    }

    /// Whether conflicting rows are dropped.
    #[must_use]
    pub fn skip_duplicates(&self) -> bool {
        self.on_duplicate == OnDuplicate::Skip
    }

    /// Whether conflicting rows are updated.
    #[must_use]
    pub fn update_duplicates(&self) -> bool {
        self.on_duplicate == OnDuplicate::Update
    }
}
