//! # oxide-upsert-sqlite
//!
//! SQLite backend for `oxide-upsert-core`.
//!
//! # How SQLite handles bulk inserts
//!
//! - **[UPSERT]**: SQLite supports `INSERT ... ON CONFLICT DO NOTHING` and
//!   `ON CONFLICT (...) DO UPDATE SET col = excluded.col` (since SQLite
//!   3.24.0). A conflict target may carry a `WHERE` clause matching a
//!   partial unique index.
//! - **[RETURNING]**: supported on INSERT since SQLite 3.35.0. Rows dropped
//!   by `DO NOTHING` are not returned.
//! - **Identifier quoting**: double quotes (`"`).
//! - **[Type affinity]**: any column can store any value, so values are cast
//!   through the table schema before binding rather than relying on the
//!   database to coerce them.
//!
//! [UPSERT]: https://www.sqlite.org/lang_upsert.html
//! [RETURNING]: https://www.sqlite.org/lang_returning.html
//! [Type affinity]: https://www.sqlite.org/datatype3.html
//!
//! ## Example
//!
//! ```rust
//! use oxide_upsert_core::{Dialect, InsertRequest, OnDuplicate, Row, StatementBuilder, TableSchema};
//! use oxide_upsert_sqlite::SqliteDialect;
//!
//! let schema = TableSchema::new("users").primary_key(&["id"]);
//! let rows = vec![Row::new().with("id", 1).with("name", "Alice")];
//!
//! let dialect = SqliteDialect::new();
//! let request = InsertRequest::builder(&schema, rows)
//!     .on_duplicate(OnDuplicate::Update)
//!     .build(&dialect)
//!     .unwrap();
//! let fragments = StatementBuilder::new(&request, &dialect).build().unwrap();
//!
//! let (sql, params) = dialect.build_insert(&fragments);
//! assert_eq!(
//!     sql,
//!     "INSERT INTO \"users\" (\"id\", \"name\") VALUES (?, ?) \
//!      ON CONFLICT (\"id\") DO UPDATE SET \"name\" = excluded.\"name\" \
//!      RETURNING \"id\""
//! );
//! assert_eq!(params.len(), 2);
//! ```

mod dialect;
pub mod error;
pub mod executor;

pub use dialect::SqliteDialect;
pub use error::{ExecuteError, Result};
pub use executor::{ExecuteOutcome, SqliteExecutor};
