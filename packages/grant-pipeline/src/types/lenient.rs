//! Forgiving deserializers for model-produced JSON.
//!
//! Models routinely emit `null`, numbers, or a bare string where a list was
//! asked for. These helpers coerce such values instead of rejecting the
//! whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::grant::NOT_SPECIFIED;

pub(crate) fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

pub(crate) fn not_specified_value() -> Value {
    Value::String(NOT_SPECIFIED.to_string())
}

/// String field: `null` becomes the sentinel, scalars are stringified,
/// arrays are joined with ", ".
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value))
}

/// List field: `null` becomes empty, a lone string becomes a one-item list.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .filter(|v| !v.is_null())
            .map(value_to_string)
            .collect(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        other => vec![value_to_string(other)],
    })
}

/// Nested object that may come back as `null`.
pub(crate) fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Arbitrary JSON that should fall back to the sentinel when absent.
pub(crate) fn value_or_sentinel<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(if value.is_null() {
        not_specified_value()
    } else {
        value
    })
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => not_specified(),
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .filter(|v| !v.is_null())
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
