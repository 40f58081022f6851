//! Field deserializers for hand-edited data files.
//!
//! Superhero records are never validated: a value of an unexpected JSON type
//! is coerced to the field's nearest meaning instead of failing the whole
//! collection.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Any JSON value as text. `null` is empty, strings are kept verbatim.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(&Value::deserialize(deserializer)?))
}

/// A list of texts. `null` is empty and a lone scalar becomes one item.
pub(crate) fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(value_text)
            .collect(),
        other => vec![value_text(&other)],
    };
    Ok(list)
}

/// A JSON number, or a string holding one. Anything else is absent.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(n),
        Value::String(s) => s.trim().parse::<Number>().ok(),
        _ => None,
    };
    Ok(number)
}

/// Textual form used for matching: lists joined with `,`, `null` empty.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
