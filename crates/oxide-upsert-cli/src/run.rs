//! Turning command-line options into a rendered or executed bulk insert.

use clap::ValueEnum;
use oxide_upsert_core::{
    Dialect, GenericDialect, InsertRequest, MysqlDialect, PostgresDialect, Returning, Row,
    StatementBuilder, TableSchema,
};
use oxide_upsert_sqlite::SqliteDialect;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _};

use crate::error::Result;

/// Target database flavor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite; the only backend that can be executed directly.
    #[default]
    Sqlite,
    /// PostgreSQL.
    Postgres,
    /// MySQL.
    Mysql,
    /// Plain multi-row inserts, no upsert support.
    Generic,
}

impl Backend {
    /// Dialect used to validate and render statements for this backend.
    #[must_use]
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Sqlite => Box::new(SqliteDialect::new()),
            Self::Postgres => Box::new(PostgresDialect::new()),
            Self::Mysql => Box::new(MysqlDialect::new()),
            Self::Generic => Box::new(GenericDialect::new()),
        }
    }

    /// Whether statements for this backend run against a database. Dry runs
    /// of such backends go through the executor; others are only printed.
    #[must_use]
    pub const fn is_executable(self) -> bool {
        matches!(self, Self::Sqlite)
    }
}

/// Request options gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct InsertOptions {
    /// Policy name (`raise`, `skip` or `update`).
    pub on_duplicate: String,
    /// Explicit returning columns.
    pub returning: Option<Vec<String>>,
    /// Disables RETURNING entirely.
    pub no_returning: bool,
    /// Conflict-target index name.
    pub unique_by: Option<String>,
    /// Conflict-target index column list.
    pub unique_by_columns: Option<Vec<String>>,
}

impl InsertOptions {
    fn returning(&self) -> Returning {
        if self.no_returning {
            Returning::None
        } else {
            self.returning
                .clone()
                .map_or(Returning::Default, Returning::Columns)
        }
    }
}

/// Validates `rows` against `dialect` with the given options.
///
/// # Errors
///
/// Returns the first validation failure of the request.
pub fn build_request<'a, D: Dialect + ?Sized>(
    schema: &'a TableSchema,
    rows: Vec<Row>,
    options: &InsertOptions,
    dialect: &D,
) -> Result<InsertRequest<'a>> {
    let mut builder = InsertRequest::builder(schema, rows)
        .on_duplicate_named(options.on_duplicate.as_str())
        .returning(options.returning());
    if let Some(ref name) = options.unique_by {
        builder = builder.unique_by(name.as_str());
    }
    if let Some(ref columns) = options.unique_by_columns {
        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
        builder = builder.unique_by_columns(&columns);
    }
    Ok(builder.build(dialect)?)
}

/// Renders the statement with every value inlined.
///
/// # Errors
///
/// Fails if the rows do not share one key set.
pub fn render_sql<D: Dialect + ?Sized>(request: &InsertRequest<'_>, dialect: &D) -> Result<String> {
    let fragments = StatementBuilder::new(request, dialect).build()?;
    Ok(dialect.build_insert_sql(&fragments))
}

/// Converts a returned row into a JSON object keyed by column name.
#[must_use]
pub fn row_to_json(row: &SqliteRow) -> Value {
    let object: Map<String, Value> = row
        .columns()
        .iter()
        .map(|column| {
            (
                column.name().to_string(),
                cell_to_json(row, column.ordinal()),
            )
        })
        .collect();
    Value::Object(object)
}

fn cell_to_json(row: &SqliteRow, index: usize) -> Value {
    if let Ok(v) = row.try_get::<Option<i64>, _>(index) {
        return v.map_or(Value::Null, Value::from);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(index) {
        return v.map_or(Value::Null, Value::from);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(index) {
        return v.map_or(Value::Null, Value::from);
    }
    row.try_get::<Option<Vec<u8>>, _>(index)
        .ok()
        .flatten()
        .map_or(Value::Null, Value::from)
}
