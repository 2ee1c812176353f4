//! Casting raw row values through declared column types.
//!
//! Every cell of a bulk insert passes through [`cast`] exactly once. Values
//! that cannot be coerced to the declared type keep their natural binding and
//! are left for the database to accept or reject. Arrays and objects have no
//! native binding and are serialized to JSON text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::schema::ColumnType;
use crate::value::SqlValue;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Casts `raw` into a bindable value for a column of type `ty`.
///
/// `None` means the column is unknown to the schema; the value is bound as-is.
#[must_use]
pub fn cast(ty: Option<ColumnType>, raw: &Value) -> SqlValue {
    if raw.is_null() {
        return SqlValue::Null;
    }
    let Some(ty) = ty else {
        return natural(raw);
    };
    let cast = match ty {
        ColumnType::Integer => to_integer(raw),
        ColumnType::Float => to_float(raw),
        ColumnType::Text => to_text(raw),
        ColumnType::Boolean => to_boolean(raw),
        ColumnType::Blob => to_blob(raw),
        ColumnType::Json => Some(SqlValue::Text(raw.to_string())),
        ColumnType::Timestamp => to_timestamp(raw),
        ColumnType::Date => to_date(raw),
    };
    cast.unwrap_or_else(|| natural(raw))
}

/// The binding a raw value gets without any declared type.
fn natural(raw: &Value) -> SqlValue {
    match raw {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Bool(*b),
        Value::Number(n) => n.as_i64().map_or_else(
            || n.as_f64().map_or_else(|| SqlValue::Text(n.to_string()), SqlValue::Float),
            SqlValue::Int,
        ),
        Value::String(s) => SqlValue::Text(s.clone()),
        // serialization fallback
        Value::Array(_) | Value::Object(_) => SqlValue::Text(raw.to_string()),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate(f: f64) -> Option<i64> {
    let t = f.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

fn to_integer(raw: &Value) -> Option<SqlValue> {
    let n = match raw {
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => truncate(n.as_f64()?)?,
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => i,
                Err(_) => truncate(s.parse::<f64>().ok()?)?,
            }
        }
        _ => return None,
    };
    Some(SqlValue::Int(n))
}

fn to_float(raw: &Value) -> Option<SqlValue> {
    let f = match raw {
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    // NaN and infinities have no SQL literal
    f.is_finite().then_some(SqlValue::Float(f))
}

fn to_text(raw: &Value) -> Option<SqlValue> {
    Some(match raw {
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Bool(b) => SqlValue::Text(b.to_string()),
        other => SqlValue::Text(other.to_string()),
    })
}

fn to_boolean(raw: &Value) -> Option<SqlValue> {
    let b = match raw {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64()? != 0.0,
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" | "on" => true,
            "false" | "f" | "0" | "no" | "n" | "off" => false,
            _ => return None,
        },
        _ => return None,
    };
    Some(SqlValue::Bool(b))
}

fn to_blob(raw: &Value) -> Option<SqlValue> {
    match raw {
        Value::String(s) => Some(SqlValue::Blob(s.as_bytes().to_vec())),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .map(SqlValue::Blob),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn to_timestamp(raw: &Value) -> Option<SqlValue> {
    let dt = match raw {
        Value::String(s) => parse_datetime(s)?,
        Value::Number(n) => DateTime::<Utc>::from_timestamp(n.as_i64()?, 0)?.naive_utc(),
        _ => return None,
    };
    Some(SqlValue::Text(dt.format(TIMESTAMP_FORMAT).to_string()))
}

fn to_date(raw: &Value) -> Option<SqlValue> {
    let Value::String(s) = raw else {
        return None;
    };
    let date = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .ok()
        .or_else(|| parse_datetime(s).map(|dt| dt.date()))?;
    Some(SqlValue::Text(date.format(DATE_FORMAT).to_string()))
}
