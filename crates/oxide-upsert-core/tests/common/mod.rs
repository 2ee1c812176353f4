#![allow(dead_code)]

use oxide_upsert_core::{
    CapabilitySet, Fragments, GenericDialect, InsertError, InsertRequest, InsertRequestBuilder, Row,
    StatementBuilder, TableSchema,
};
use serde_json::Value;

/// `users(id PK, name, email UNIQUE, created_at read-only)`.
pub fn users() -> TableSchema {
    serde_json::from_str(
        r#"{
            "name": "users",
            "columns": [
                {"name": "id", "type": "integer"},
                {"name": "name", "type": "text"},
                {"name": "email", "type": "text"},
                {"name": "created_at", "type": "timestamp"}
            ],
            "primary_key": ["id"],
            "readonly_columns": ["created_at"],
            "indexes": [
                {"name": "index_users_on_email", "columns": ["email"]},
                {"name": "index_users_on_name_email", "columns": ["name", "email"], "predicate": "name > ''"}
            ]
        }"#,
    )
    .expect("users schema should deserialize")
}

pub fn row(cells: &[(&str, Value)]) -> Row {
    cells.iter().map(|(k, v)| (*k, v.clone())).collect()
}

pub fn build(builder: InsertRequestBuilder<'_>, caps: CapabilitySet) -> InsertRequest<'_> {
    builder
        .build(&caps)
        .unwrap_or_else(|e| panic!("Expected a valid request, got {e:?}"))
}

pub fn build_err(builder: InsertRequestBuilder<'_>, caps: CapabilitySet) -> InsertError {
    match builder.build(&caps) {
        Ok(request) => panic!("Expected a construction error, got {request:?}"),
        Err(e) => e,
    }
}

/// Renders fragments quoting with the generic dialect.
pub fn fragments(request: &InsertRequest<'_>) -> Fragments {
    StatementBuilder::new(request, &GenericDialect::new())
        .build()
        .unwrap_or_else(|e| panic!("Expected fragments, got {e:?}"))
}

pub fn skip_and_returning() -> CapabilitySet {
    CapabilitySet {
        returning: true,
        on_duplicate_skip: true,
        ..CapabilitySet::none()
    }
}
