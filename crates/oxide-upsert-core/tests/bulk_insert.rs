//! Construction and validation of bulk insert requests: key sets, returning
//! defaults, the update-to-skip downgrade and capability checks.

mod common;
use common::*;

use oxide_upsert_core::{
    CapabilitySet, InsertError, InsertRequest, OnDuplicate, Returning, Row, TableSchema,
};
use serde_json::json;

#[test]
fn test_keys_come_from_first_row() {
    let schema = users();
    let rows = vec![
        row(&[("name", json!("a")), ("id", json!(1))]),
        row(&[("id", json!(2)), ("name", json!("b"))]),
    ];
    let request = build(InsertRequest::builder(&schema, rows), CapabilitySet::none());
    assert_eq!(request.keys(), ["name", "id"]);
    assert_eq!(request.rows().len(), 2);
}

#[test]
fn test_empty_batch_is_rejected() {
    let schema = users();
    let err = build_err(InsertRequest::builder(&schema, vec![]), CapabilitySet::all());
    assert_eq!(err, InsertError::EmptyBatch);
}

#[test]
fn test_empty_batch_wins_over_every_other_check() {
    let schema = users();
    let err = build_err(
        InsertRequest::builder(&schema, Vec::new())
            .on_duplicate_named("bogus")
            .unique_by("missing")
            .returning(Returning::columns(&["id"])),
        CapabilitySet::none(),
    );
    assert_eq!(err, InsertError::EmptyBatch);
}

#[test]
fn test_returning_defaults_to_primary_key_when_supported() {
    let schema = users();
    let rows = vec![row(&[("id", json!(1)), ("name", json!("a"))])];
    let request = build(
        InsertRequest::builder(&schema, rows.clone()),
        CapabilitySet::all(),
    );
    assert_eq!(request.returning(), Some(&[String::from("id")][..]));

    let request = build(InsertRequest::builder(&schema, rows), CapabilitySet::none());
    assert_eq!(request.returning(), None);
}

#[test]
fn test_explicit_returning_requires_support() {
    let schema = users();
    let rows = vec![row(&[("id", json!(1))])];
    let err = build_err(
        InsertRequest::builder(&schema, rows.clone()).returning(Returning::columns(&["id"])),
        CapabilitySet::none(),
    );
    assert_eq!(err, InsertError::UnsupportedReturning);

    let request = build(
        InsertRequest::builder(&schema, rows).returning(Returning::columns(&["id", "name"])),
        CapabilitySet::all(),
    );
    assert_eq!(
        request.returning(),
        Some(&[String::from("id"), String::from("name")][..])
    );
}

#[test]
fn test_empty_returning_disables_returning() {
    let schema = users();
    let rows = vec![row(&[("id", json!(1))])];
    let request = build(
        InsertRequest::builder(&schema, rows.clone()).returning(Returning::Columns(vec![])),
        CapabilitySet::none(),
    );
    assert_eq!(request.returning(), None);

    let request = build(
        InsertRequest::builder(&schema, rows).returning(Returning::None),
        CapabilitySet::all(),
    );
    assert_eq!(request.returning(), None);
}

#[test]
fn test_table_without_primary_key_returns_nothing_by_default() {
    let schema = TableSchema::new("logs");
    let rows = vec![row(&[("line", json!("boot"))])];
    let request = build(InsertRequest::builder(&schema, rows), CapabilitySet::all());
    assert_eq!(request.returning(), None);
    assert!(request.primary_keys().is_empty());
}

#[test]
fn test_update_downgrades_to_skip_when_nothing_is_updatable() {
    let schema = users();
    let rows = vec![
        row(&[("id", json!(1)), ("created_at", json!("2024-01-01"))]),
        row(&[("id", json!(2)), ("created_at", json!("2024-01-02"))]),
    ];
    let request = build(
        InsertRequest::builder(&schema, rows.clone()).on_duplicate(OnDuplicate::Update),
        CapabilitySet::all(),
    );
    assert!(request.updatable_columns().is_empty());
    assert_eq!(request.on_duplicate(), OnDuplicate::Skip);
    assert!(request.skip_duplicates());

    // Re-deriving from the effective policy is stable.
    let again = build(
        InsertRequest::builder(&schema, rows).on_duplicate(request.on_duplicate()),
        CapabilitySet::all(),
    );
    assert_eq!(again.on_duplicate(), OnDuplicate::Skip);
}

#[test]
fn test_updatable_columns_keep_row_order() {
    let schema = users();
    let rows = vec![row(&[
        ("email", json!("a@x.io")),
        ("created_at", json!(0)),
        ("id", json!(1)),
        ("name", json!("a")),
    ])];
    let request = build(
        InsertRequest::builder(&schema, rows).on_duplicate(OnDuplicate::Update),
        CapabilitySet::all(),
    );
    assert_eq!(request.updatable_columns(), ["email", "name"]);
}

#[test]
fn test_unknown_index_is_rejected() {
    let schema = users();
    let rows = vec![row(&[("id", json!(1)), ("email", json!("a@x.io"))])];
    let err = build_err(
        InsertRequest::builder(&schema, rows)
            .on_duplicate(OnDuplicate::Skip)
            .unique_by("index_users_on_login"),
        CapabilitySet::all(),
    );
    assert_eq!(err, InsertError::UnknownIndex(String::from("index_users_on_login")));
}

#[test]
fn test_index_lookup_is_case_sensitive() {
    let schema = users();
    let rows = vec![row(&[("id", json!(1)), ("email", json!("a@x.io"))])];
    let err = build_err(
        InsertRequest::builder(&schema, rows).unique_by("INDEX_USERS_ON_EMAIL"),
        CapabilitySet::all(),
    );
    assert!(matches!(err, InsertError::UnknownIndex(_)));
}

#[test]
fn test_unsupported_policies() {
    let schema = users();
    let rows = vec![row(&[("id", json!(1)), ("name", json!("a"))])];

    let err = build_err(
        InsertRequest::builder(&schema, rows.clone()).on_duplicate(OnDuplicate::Skip),
        CapabilitySet::none(),
    );
    assert_eq!(err, InsertError::UnsupportedSkip);

    let err = build_err(
        InsertRequest::builder(&schema, rows.clone()).on_duplicate(OnDuplicate::Update),
        skip_and_returning(),
    );
    assert_eq!(err, InsertError::UnsupportedUpdate);

    let err = build_err(
        InsertRequest::builder(&schema, rows).on_duplicate_named("replace"),
        CapabilitySet::all(),
    );
    assert_eq!(
        err,
        InsertError::UnsupportedOnDuplicateValue(String::from("replace"))
    );
}

#[test]
fn test_conflict_target_requires_support() {
    let schema = users();
    let rows = vec![row(&[("id", json!(1)), ("email", json!("a@x.io"))])];
    let err = build_err(
        InsertRequest::builder(&schema, rows).unique_by("index_users_on_email"),
        skip_and_returning(),
    );
    assert_eq!(err, InsertError::UnsupportedConflictTarget);
}

#[test]
fn test_rows_deserialized_from_json() {
    let schema = users();
    let rows: Vec<Row> =
        serde_json::from_str(r#"[{"id": 1, "name": "a"}, {"name": "b", "id": 2}]"#).unwrap();
    let request = build(InsertRequest::builder(&schema, rows), CapabilitySet::none());
    assert_eq!(request.keys(), ["id", "name"]);
}
