//! oxide-upsert CLI
//!
//! Bulk insert and upsert of JSON rows.

use std::path::PathBuf;

use clap::Parser;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_upsert::{build_request, read_rows, read_schema, render_sql, row_to_json};
use oxide_upsert::{Backend, InsertOptions};
use oxide_upsert_sqlite::{ExecuteOutcome, SqliteExecutor};

/// Bulk insert and upsert of JSON rows.
#[derive(Parser)]
#[command(name = "oxide-upsert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Table schema (JSON).
    schema: PathBuf,

    /// Rows to insert (JSON array of objects).
    rows: PathBuf,

    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:db.sqlite3")]
    database: String,

    /// Target dialect. Only SQLite is executed; others print SQL.
    #[arg(long, value_enum, default_value_t = Backend::Sqlite)]
    dialect: Backend,

    /// What to do with duplicate rows: raise, skip or update.
    #[arg(short, long, default_value = "raise")]
    on_duplicate: String,

    /// Columns to return (comma separated). Defaults to the primary key.
    #[arg(short, long, value_delimiter = ',', conflicts_with = "no_returning")]
    returning: Option<Vec<String>>,

    /// Do not return anything.
    #[arg(long)]
    no_returning: bool,

    /// Unique index to use as the conflict target, by name.
    #[arg(short, long, conflicts_with = "unique_by_columns")]
    unique_by: Option<String>,

    /// Unique index to use as the conflict target, by columns (comma separated).
    #[arg(long, value_delimiter = ',')]
    unique_by_columns: Option<Vec<String>>,

    /// Show SQL without executing (dry run). Still connects to the database.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let schema = read_schema(&cli.schema)?;
    let rows = read_rows(&cli.rows)?;
    let options = InsertOptions {
        on_duplicate: cli.on_duplicate,
        returning: cli.returning,
        no_returning: cli.no_returning,
        unique_by: cli.unique_by,
        unique_by_columns: cli.unique_by_columns,
    };

    if !cli.dialect.is_executable() {
        let dialect = cli.dialect.dialect();
        let request = build_request(&schema, rows, &options, &*dialect)?;
        println!("{}", render_sql(&request, &*dialect)?);
        return Ok(());
    }

    if cli.dry_run {
        info!("Dry run mode - SQL will be printed but not executed.");
    }

    // Connect to database
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&cli.database)
        .await?;

    let executor = SqliteExecutor::new(pool).dry_run(cli.dry_run);
    let request = build_request(&schema, rows, &options, executor.dialect())?;

    match executor.insert_all(&request).await? {
        ExecuteOutcome::RowsAffected(n) => {
            info!(rows_affected = n, table = %schema.name(), "Insert complete.");
        }
        ExecuteOutcome::Returned(rows) => {
            info!(returned = rows.len(), table = %schema.name(), "Insert complete.");
            for row in &rows {
                println!("{}", row_to_json(row));
            }
        }
        ExecuteOutcome::DryRun(sql) => println!("{sql}"),
    }

    Ok(())
}
