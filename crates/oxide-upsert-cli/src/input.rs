//! Loading the table schema and the row batch from JSON files.

use std::path::Path;

use oxide_upsert_core::{Row, TableSchema};
use serde_json::Value;
use tracing::debug;

use crate::error::{CliError, Result};

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a [`TableSchema`] from a JSON file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a valid schema document.
pub fn read_schema(path: &Path) -> Result<TableSchema> {
    let text = read(path)?;
    let schema: TableSchema = serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        table = %schema.name(),
        columns = schema.columns().len(),
        indexes = schema.indexes().len(),
        "Loaded table schema"
    );
    Ok(schema)
}

/// Reads a JSON array of row objects.
///
/// Key order inside each object is preserved.
///
/// # Errors
///
/// Fails if the file cannot be read, is not a JSON array, or holds an entry
/// that is not an object.
pub fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let text = read(path)?;
    let entries: Vec<Value> = serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(map) => Ok(Row::from(map)),
            _ => Err(CliError::NotAnObject {
                path: path.to_path_buf(),
                index,
            }),
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(rows = rows.len(), "Loaded rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_upsert_core::ColumnType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_schema() {
        let file = file_with(
            r#"{
                "name": "users",
                "columns": [
                    {"name": "id", "type": "integer"},
                    {"name": "email", "type": "text"}
                ],
                "primary_key": ["id"],
                "indexes": [{"name": "users_email", "columns": ["email"]}]
            }"#,
        );
        let schema = read_schema(file.path()).unwrap();
        assert_eq!(schema.name(), "users");
        assert_eq!(schema.primary_keys(), ["id"]);
        assert_eq!(schema.column_type("email"), Some(ColumnType::Text));
        assert!(schema.find_index("users_email").is_some());
    }

    #[test]
    fn test_read_rows_keeps_key_order() {
        let file = file_with(r#"[{"b": 1, "a": 2}, {"b": 3, "a": 4}]"#);
        let rows = read_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_read_rows_rejects_non_objects() {
        let file = file_with(r#"[{"a": 1}, [1, 2]]"#);
        let err = read_rows(file.path()).unwrap_err();
        assert!(matches!(err, CliError::NotAnObject { index: 1, .. }));
    }

    #[test]
    fn test_read_rows_requires_array() {
        let file = file_with(r#"{"a": 1}"#);
        assert!(matches!(
            read_rows(file.path()).unwrap_err(),
            CliError::Json { .. }
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_schema(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
