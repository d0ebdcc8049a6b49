//! Serde helpers for nutrition columns that arrive as numbers, numeric
//! strings, or null. Values are parsed once here and stay numeric afterwards.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a finite number.
///
/// Accepts JSON numbers and trimmed numeric strings; anything else is `None`.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

pub fn f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Integer columns (calories, sodium) are rounded to the nearest whole unit.
pub fn i64_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .map(|v| v.round() as i64))
}

/// String lists keep the difference between "not listed" (null, missing or
/// not an array) and an explicit empty list. Non-string entries are dropped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// `string_list` for fields that do not need the "not listed" distinction:
/// null, missing or non-array becomes an empty list.
pub fn string_list_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_list(deserializer)?.unwrap_or_default())
}
