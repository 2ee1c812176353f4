//! # oxide-upsert-core
//!
//! Portable multi-row INSERT and upsert statements.
//!
//! This crate provides:
//! - [`InsertRequest`], which validates a batch of rows, an on-duplicate
//!   policy, a returning selection and a conflict-target index against a
//!   [`TableSchema`] and the backend's [`Capabilities`]
//! - [`StatementBuilder`], which renders the request into [`Fragments`]:
//!   the INTO clause, the cast VALUES list, the RETURNING list, the conflict
//!   target and the columns to update
//! - [`Dialect`] implementations that assemble fragments into one statement
//!
//! ## Validation happens up front
//!
//! ```rust
//! use oxide_upsert_core::{GenericDialect, InsertError, InsertRequest, OnDuplicate, Row, TableSchema};
//!
//! let users = TableSchema::new("users").primary_key(&["id"]);
//! let rows = vec![Row::new().with("id", 1).with("name", "Alice")];
//!
//! // The generic dialect cannot skip duplicates.
//! let err = InsertRequest::builder(&users, rows)
//!     .on_duplicate(OnDuplicate::Skip)
//!     .build(&GenericDialect::new())
//!     .unwrap_err();
//! assert_eq!(err, InsertError::UnsupportedSkip);
//! ```

pub mod cast;
pub mod dialect;
pub mod error;
pub mod insert;
pub mod schema;
pub mod value;

pub use cast::cast;
pub use dialect::{
    Capabilities, CapabilitySet, Dialect, GenericDialect, MysqlDialect, PostgresDialect,
};
pub use error::{InsertError, Result};
pub use insert::{
    Fragments, InsertRequest, InsertRequestBuilder, OnDuplicate, Returning, StatementBuilder,
    UniqueBy, ValuesList,
};
pub use schema::{ColumnDef, ColumnType, TableSchema, UniqueIndex};
pub use value::{Row, SqlValue};
