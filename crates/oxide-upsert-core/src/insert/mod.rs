//! Multi-row INSERT with optional conflict handling.
//!
//! An [`InsertRequest`] validates a batch against a table and a backend's
//! [`Capabilities`](crate::Capabilities); a [`StatementBuilder`] turns it into
//! [`Fragments`] that a [`Dialect`](crate::Dialect) assembles into one
//! statement.
//!
//! # Example
//!
//! ```rust
//! use oxide_upsert_core::{
//!     Dialect, InsertRequest, OnDuplicate, PostgresDialect, Row, StatementBuilder, TableSchema,
//! };
//!
//! let users = TableSchema::new("users").primary_key(&["id"]);
//! let rows = vec![
//!     Row::new().with("id", 1).with("name", "Alice"),
//!     Row::new().with("id", 2).with("name", "Bob"),
//! ];
//!
//! let dialect = PostgresDialect::new();
//! let request = InsertRequest::builder(&users, rows)
//!     .on_duplicate(OnDuplicate::Update)
//!     .build(&dialect)?;
//! let fragments = StatementBuilder::new(&request, &dialect).build()?;
//! let (sql, params) = dialect.build_insert(&fragments);
//!
//! assert_eq!(
//!     sql,
//!     "INSERT INTO \"users\" (\"id\", \"name\") VALUES ($1, $2), ($3, $4) \
//!      ON CONFLICT (\"id\") DO UPDATE SET \"name\" = excluded.\"name\" RETURNING \"id\""
//! );
//! assert_eq!(params.len(), 4);
//! # Ok::<(), oxide_upsert_core::InsertError>(())
//! ```

mod fragments;
mod request;
mod statement;

pub use fragments::{Fragments, ValuesList};
pub use request::{InsertRequest, InsertRequestBuilder, OnDuplicate, Returning, UniqueBy};
pub use statement::StatementBuilder;
