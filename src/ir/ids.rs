//! Item identifiers.
//!
//! Benchmark inputs identify items either by integer (`"id": 17`) or by
//! string (`"id": "c-17"`). [`ItemId`] carries both forms behind one hashable,
//! totally ordered type so the rest of the crate never looks at raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::LabelbenchError;

/// A unique identifier for an item under evaluation.
///
/// Integers order before strings; within a kind the natural order applies.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl ItemId {
    /// Decodes an id from a JSON value.
    ///
    /// Only integers and strings are accepted. Floats, booleans, nulls,
    /// arrays and objects fail with [`LabelbenchError::InvalidInput`].
    pub fn from_json(value: &Value) -> Result<Self, LabelbenchError> {
        match value {
            Value::Number(n) if n.is_f64() => Err(LabelbenchError::InvalidInput(format!(
                "unsupported item id type: {}",
                json_type_name(value)
            ))),
            Value::Number(n) => n.as_i64().map(ItemId::Int).ok_or_else(|| {
                LabelbenchError::InvalidInput(format!(
                    "item id {n} is not an integer in the i64 range"
                ))
            }),
            Value::String(s) => Ok(ItemId::Str(s.clone())),
            other => Err(LabelbenchError::InvalidInput(format!(
                "unsupported item id type: {}",
                json_type_name(other)
            ))),
        }
    }

    /// Decodes an id from a JSON object key.
    ///
    /// Keys are always strings in JSON; keys in canonical `i64` form become
    /// [`ItemId::Int`] so `{"1": [...]}` and `[{"id": 1}]` agree. Keys such
    /// as `"007"` or `"+7"` stay strings.
    pub fn from_key(key: &str) -> Self {
        match key.parse::<i64>() {
            Ok(n) if n.to_string() == key => ItemId::Int(n),
            _ => ItemId::Str(key.to_string()),
        }
    }

    /// Returns the JSON value form of this id.
    pub fn to_json(&self) -> Value {
        match self {
            ItemId::Int(n) => Value::from(*n),
            ItemId::Str(s) => Value::from(s.as_str()),
        }
    }

    /// Returns the JSON object key form of this id.
    pub fn to_key(&self) -> String {
        self.to_string()
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Int(n)
    }
}

impl From<i32> for ItemId {
    fn from(n: i32) -> Self {
        ItemId::Int(i64::from(n))
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Str(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Str(s)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "ItemId({})", n),
            ItemId::Str(s) => write!(f, "ItemId({:?})", s),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{}", n),
            ItemId::Str(s) => write!(f, "{}", s),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
