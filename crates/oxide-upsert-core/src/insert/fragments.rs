//! The rendered pieces of a bulk insert, ready for a dialect to assemble.

use crate::value::SqlValue;

/// Cast values of a bulk insert, one tuple per row, in statement order.
///
/// Every tuple lines up positionally with [`Fragments::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesList {
    rows: Vec<Vec<SqlValue>>,
}

impl ValuesList {
    pub(crate) const fn new(rows: Vec<Vec<SqlValue>>) -> Self {
        Self { rows }
    }

    /// The value tuples.
    #[must_use]
    pub fn rows(&self) -> &[Vec<SqlValue>] {
        &self.rows
    }

    /// Number of tuples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no tuples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders `(v1, v2), (v3, v4)` with every value inlined and escaped.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        self.to_sql_literals(SqlValue::to_sql_inline)
    }

    /// Renders the tuples with each value spelled by `literal`.
    pub fn to_sql_literals<F>(&self, mut literal: F) -> String
    where
        F: FnMut(&SqlValue) -> String,
    {
        let tuples: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let literals: Vec<String> = row.iter().map(&mut literal).collect();
                format!("({})", literals.join(", "))
            })
            .collect();
        tuples.join(", ")
    }

    /// Renders the tuples with placeholders and returns the parameters in
    /// binding order.
    ///
    /// `placeholder` receives the 1-based position of each parameter.
    pub fn to_sql_placeholders<F>(&self, mut placeholder: F) -> (String, Vec<SqlValue>)
    where
        F: FnMut(usize) -> String,
    {
        let mut params = Vec::with_capacity(self.rows.iter().map(Vec::len).sum());
        let tuples: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let slots: Vec<String> = row
                    .iter()
                    .map(|value| {
                        params.push(value.clone());
                        placeholder(params.len())
                    })
                    .collect();
                format!("({})", slots.join(", "))
            })
            .collect();
        (tuples.join(", "), params)
    }
}

/// Everything a dialect needs to spell one bulk insert statement.
///
/// Identifiers are already quoted for the dialect that built the fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragments {
    /// Quoted table name.
    pub table: String,
    /// Quoted table name followed by the parenthesized column list.
    pub into: String,
    /// Quoted column names in statement order.
    pub columns: Vec<String>,
    /// Cast values, one tuple per row.
    pub values: ValuesList,
    /// Comma-joined quoted RETURNING columns, when returning is enabled.
    pub returning: Option<String>,
    /// Parenthesized conflict columns plus an optional `WHERE` predicate.
    pub conflict_target: Option<String>,
    /// Quoted columns to overwrite on conflict.
    pub updatable_columns: Vec<String>,
    /// Conflicting rows are dropped.
    pub skip_duplicates: bool,
    /// Conflicting rows are updated.
    pub update_duplicates: bool,
}
