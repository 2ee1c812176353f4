//! Command-line bulk inserts.
//!
//! `oxide-upsert` loads a table schema and a batch of rows from JSON files,
//! validates the request against the selected backend and then either prints
//! the statement or runs it against SQLite.
//!
//! # Input files
//!
//! The schema file describes one table:
//!
//! ```json
//! {
//!   "name": "users",
//!   "columns": [
//!     {"name": "id", "type": "integer"},
//!     {"name": "email", "type": "text"},
//!     {"name": "created_at", "type": "timestamp"}
//!   ],
//!   "primary_key": ["id"],
//!   "readonly_columns": ["created_at"],
//!   "indexes": [
//!     {"name": "users_email", "columns": ["email"], "predicate": "deleted_at IS NULL"}
//!   ]
//! }
//! ```
//!
//! The rows file is a JSON array of objects which all share the keys of the
//! first one.
//!
//! # Example
//!
//! ```bash
//! oxide-upsert users.schema.json users.json --on-duplicate update --unique-by users_email
//! oxide-upsert users.schema.json users.json --dialect postgres --no-returning
//! ```

pub mod error;
pub mod input;
pub mod run;

pub use error::{CliError, Result};
pub use input::{read_rows, read_schema};
pub use run::{build_request, render_sql, row_to_json, Backend, InsertOptions};
