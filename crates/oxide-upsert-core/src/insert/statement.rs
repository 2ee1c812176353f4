//! Rendering a validated request into statement fragments.

use tracing::debug;

use super::fragments::{Fragments, ValuesList};
use super::request::InsertRequest;
use crate::cast::cast;
use crate::dialect::Dialect;
use crate::error::{InsertError, Result};
use crate::value::SqlValue;

/// Renders the SQL fragments of one [`InsertRequest`].
///
/// The builder only quotes identifiers and casts values; the dialect decides
/// how the fragments are spelled as a statement.
pub struct StatementBuilder<'r, 'a, D: ?Sized> {
    request: &'r InsertRequest<'a>,
    dialect: &'r D,
}

impl<'r, 'a, D: Dialect + ?Sized> StatementBuilder<'r, 'a, D> {
    /// Creates a builder quoting identifiers for `dialect`.
    #[must_use]
    pub const fn new(request: &'r InsertRequest<'a>, dialect: &'r D) -> Self {
        Self { request, dialect }
    }

    fn quote_all<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(|name| self.dialect.quote_identifier(name.as_ref()))
            .collect()
    }

    /// Quoted column names in first-row order.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.quote_all(self.request.keys())
    }

    /// Quoted table name followed by the parenthesized column list.
    #[must_use]
    pub fn insert_target(&self) -> String {
        format!(
            "{} ({})",
            self.dialect.quote_identifier(self.request.table().name()),
            self.columns().join(", ")
        )
    }

    /// Casts every row into a tuple aligned with [`Self::columns`].
    ///
    /// All key sets are checked against the first row before any value is
    /// cast; a mismatch aborts the whole batch.
    pub fn values_list(&self) -> Result<ValuesList> {
        let keys = self.request.keys();
        if let Some((row, found)) = self
            .request
            .rows()
            .iter()
            .enumerate()
            .find(|(_, row)| !row.has_key_set(keys))
        {
            return Err(InsertError::RowKeyMismatch {
                row,
                expected: keys.to_vec(),
                found: found.keys().map(String::from).collect(),
            });
        }

        let types = self.request.table().column_types();
        let column_types: Vec<_> = keys
            .iter()
            .map(|key| types.get(key.as_str()).copied())
            .collect();

        let rows: Vec<Vec<SqlValue>> = self
            .request
            .rows()
            .iter()
            .map(|row| {
                keys.iter()
                    .zip(&column_types)
                    .map(|(key, ty)| row.get(key).map_or(SqlValue::Null, |raw| cast(*ty, raw)))
                    .collect()
            })
            .collect();

        Ok(ValuesList::new(rows))
    }

    /// Comma-joined quoted returning columns, `None` when returning is off.
    #[must_use]
    pub fn returning(&self) -> Option<String> {
        self.request
            .returning()
            .map(|columns| self.quote_all(columns).join(", "))
    }

    /// The conflict target.
    ///
    /// The chosen unique index (plus its predicate for partial indexes), or the
    /// primary key when updating without an explicit index. Nothing otherwise.
    #[must_use]
    pub fn conflict_target(&self) -> Option<String> {
        if let Some(index) = self.request.unique_index() {
            let mut target = format!("({})", self.quote_all(&index.columns).join(", "));
            if let Some(ref predicate) = index.predicate {
                target.push_str(" WHERE ");
                target.push_str(predicate);
            }
            Some(target)
        } else if self.request.update_duplicates() && !self.request.primary_keys().is_empty() {
            Some(format!(
                "({})",
                self.quote_all(self.request.primary_keys()).join(", ")
            ))
        } else {
            None
        }
    }

    /// Quoted columns to overwrite on conflict.
    #[must_use]
    pub fn updatable_columns(&self) -> Vec<String> {
        self.quote_all(self.request.updatable_columns())
    }

    /// Renders every fragment.
    pub fn build(&self) -> Result<Fragments> {
        let values = self.values_list()?;
        let columns = self.columns();
        let table = self.dialect.quote_identifier(self.request.table().name());
        let into = self.insert_target();

        debug!(
            table = %self.request.table().name(),
            dialect = self.dialect.name(),
            rows = values.len(),
            on_duplicate = %self.request.on_duplicate(),
            "rendered bulk insert fragments"
        );

        Ok(Fragments {
            table,
            into,
            columns,
            values,
            returning: self.returning(),
            conflict_target: self.conflict_target(),
            updatable_columns: self.updatable_columns(),
            skip_duplicates: self.request.skip_duplicates(),
            update_duplicates: self.request.update_duplicates(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{CapabilitySet, GenericDialect};
    use crate::{ColumnType, OnDuplicate, Row, TableSchema, UniqueIndex};
    use serde_json::json;

    fn schema() -> TableSchema {
        TableSchema::new("events")
            .column("id", ColumnType::Integer)
            .column("kind", ColumnType::Text)
            .column("at", ColumnType::Timestamp)
            .column("payload", ColumnType::Json)
            .primary_key(&["id"])
            .index(UniqueIndex::new("by_kind_at", &["kind", "at"]))
    }

    #[test]
    fn test_values_are_cast_through_column_types() {
        let schema = schema();
        let rows = vec![Row::new()
            .with("id", "7")
            .with("kind", "login")
            .with("at", "2024-05-01T10:00:00Z")
            .with("payload", json!({"ip": "10.0.0.1"}))];
        let request = InsertRequest::builder(&schema, rows)
            .build(&CapabilitySet::none())
            .unwrap();
        let values = StatementBuilder::new(&request, &GenericDialect::new())
            .values_list()
            .unwrap();

        assert_eq!(
            values.rows()[0],
            vec![
                SqlValue::Int(7),
                SqlValue::Text(String::from("login")),
                SqlValue::Text(String::from("2024-05-01 10:00:00")),
                SqlValue::Text(String::from(r#"{"ip":"10.0.0.1"}"#)),
            ]
        );
    }

    #[test]
    fn test_unknown_columns_bind_naturally() {
        let schema = schema();
        let rows = vec![Row::new().with("id", 1).with("extra", json!([1, 2]))];
        let request = InsertRequest::builder(&schema, rows)
            .build(&CapabilitySet::none())
            .unwrap();
        let values = StatementBuilder::new(&request, &GenericDialect::new())
            .values_list()
            .unwrap();
        assert_eq!(
            values.rows()[0],
            vec![SqlValue::Int(1), SqlValue::Text(String::from("[1,2]"))]
        );
    }

    #[test]
    fn test_row_key_mismatch_reports_offending_row() {
        let schema = schema();
        let rows = vec![
            Row::new().with("id", 1).with("kind", "a"),
            Row::new().with("id", 2).with("kind", "b"),
            Row::new().with("id", 3).with("Kind", "c"),
        ];
        let request = InsertRequest::builder(&schema, rows)
            .build(&CapabilitySet::none())
            .unwrap();
        let err = StatementBuilder::new(&request, &GenericDialect::new())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            InsertError::RowKeyMismatch {
                row: 2,
                expected: vec![String::from("id"), String::from("kind")],
                found: vec![String::from("id"), String::from("Kind")],
            }
        );
    }

    #[test]
    fn test_conflict_target_on_composite_index() {
        let schema = schema();
        let rows = vec![Row::new().with("id", 1).with("kind", "a").with("at", 0)];
        let request = InsertRequest::builder(&schema, rows)
            .on_duplicate(OnDuplicate::Skip)
            .unique_by_columns(&["kind", "at"])
            .build(&CapabilitySet::all())
            .unwrap();
        let dialect = GenericDialect::new();
        let builder = StatementBuilder::new(&request, &dialect);
        assert_eq!(builder.conflict_target().as_deref(), Some("(\"kind\", \"at\")"));
        assert_eq!(builder.insert_target(), "\"events\" (\"id\", \"kind\", \"at\")");
    }

    #[test]
    fn test_no_conflict_target_for_plain_insert() {
        let schema = schema();
        let rows = vec![Row::new().with("id", 1)];
        let request = InsertRequest::builder(&schema, rows)
            .build(&CapabilitySet::all())
            .unwrap();
        let dialect = GenericDialect::new();
        let builder = StatementBuilder::new(&request, &dialect);
        assert_eq!(builder.conflict_target(), None);
        assert_eq!(builder.returning().as_deref(), Some("\"id\""));
    }
}
