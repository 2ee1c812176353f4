//! Bulk insert executor.
//!
//! Renders validated requests with [`SqliteDialect`] and runs them against a
//! pool as a single statement.

use std::fmt;

use oxide_upsert_core::dialect::Dialect;
use oxide_upsert_core::{Fragments, InsertRequest, SqlValue, StatementBuilder};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::Sqlite;
use tracing::{debug, info};

use crate::dialect::SqliteDialect;
use crate::error::Result;

/// What a bulk insert produced.
pub enum ExecuteOutcome {
    /// Rows written by a statement without RETURNING.
    RowsAffected(u64),
    /// Rows produced by the RETURNING clause. Skipped duplicates are absent.
    Returned(Vec<SqliteRow>),
    /// The SQL that would have run in dry-run mode.
    DryRun(String),
}

impl ExecuteOutcome {
    /// Number of rows written or returned; zero for a dry run.
    #[must_use]
    pub fn row_count(&self) -> u64 {
        match self {
            Self::RowsAffected(n) => *n,
            Self::Returned(rows) => rows.len() as u64,
            Self::DryRun(_) => 0,
        }
    }
}

// `SqliteRow` has no `Debug`; returned rows are shown by count.
impl fmt::Debug for ExecuteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowsAffected(n) => f.debug_tuple("RowsAffected").field(n).finish(),
            Self::Returned(rows) => f
                .debug_tuple("Returned")
                .field(&format_args!("{} rows", rows.len()))
                .finish(),
            Self::DryRun(sql) => f.debug_tuple("DryRun").field(sql).finish(),
        }
    }
}

/// Executes bulk inserts against a SQLite database.
pub struct SqliteExecutor {
    pool: SqlitePool,
    dialect: SqliteDialect,
    dry_run: bool,
}

impl SqliteExecutor {
    /// Creates a new executor.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            dialect: SqliteDialect::new(),
            dry_run: false,
        }
    }

    /// Enables dry-run mode (SQL is logged and returned but not executed).
    #[must_use]
    pub const fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Returns the dialect used to validate and render requests.
    #[must_use]
    pub const fn dialect(&self) -> &SqliteDialect {
        &self.dialect
    }

    /// Renders `request` and executes it as one statement.
    ///
    /// # Errors
    ///
    /// Fails if the rows do not share one key set, or if the database rejects
    /// the statement. Nothing is written in either case.
    pub async fn insert_all(&self, request: &InsertRequest<'_>) -> Result<ExecuteOutcome> {
        let fragments = StatementBuilder::new(request, &self.dialect).build()?;
        info!(
            table = %request.table().name(),
            rows = request.rows().len(),
            on_duplicate = %request.on_duplicate(),
            "Inserting rows"
        );
        self.execute(&fragments).await
    }

    /// Assembles and executes already rendered fragments.
    ///
    /// # Errors
    ///
    /// Returns the database error if the statement fails.
    pub async fn execute(&self, fragments: &Fragments) -> Result<ExecuteOutcome> {
        let (sql, params) = self.dialect.build_insert(fragments);
        debug!(sql = %sql, params = params.len(), "Executing SQL");

        if self.dry_run {
            return Ok(ExecuteOutcome::DryRun(sql));
        }

        let query = params.into_iter().fold(sqlx::query(&sql), bind_value);

        if fragments.returning.is_some() {
            let rows = query.fetch_all(&self.pool).await?;
            debug!(returned = rows.len(), "Bulk insert returned rows");
            Ok(ExecuteOutcome::Returned(rows))
        } else {
            let result = query.execute(&self.pool).await?;
            debug!(rows_affected = result.rows_affected(), "Bulk insert done");
            Ok(ExecuteOutcome::RowsAffected(result.rows_affected()))
        }
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(None::<i64>),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(n) => query.bind(n),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
    }
}
