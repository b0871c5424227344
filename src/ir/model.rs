//! Core item model.
//!
//! An [`Item`] is one record under evaluation (usually a user comment). The
//! scoring core only ever looks at its [`ItemId`]; everything else travels
//! along as opaque metadata so reports can echo it back.

use serde::Serialize;
use serde_json::{Map, Value};

use super::ids::{json_type_name, ItemId};
use crate::error::LabelbenchError;

/// An item under evaluation: an id plus uninterpreted metadata.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    /// Unique identifier for this item.
    pub id: ItemId,

    /// Every other field of the source record, in source order.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Item {
    /// Creates an item with no metadata.
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            metadata: Map::new(),
        }
    }

    /// Adds a metadata field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Decodes an item from a JSON object with an `id` field.
    pub fn from_json(value: &Value) -> Result<Self, LabelbenchError> {
        let Value::Object(fields) = value else {
            return Err(LabelbenchError::InvalidInput(format!(
                "item must be an object, got {}",
                json_type_name(value)
            )));
        };

        let raw_id = fields
            .get("id")
            .ok_or_else(|| LabelbenchError::InvalidInput("item has no 'id' field".to_string()))?;
        let id = ItemId::from_json(raw_id)?;

        let metadata = fields
            .iter()
            .filter(|(key, _)| key.as_str() != "id")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self { id, metadata })
    }

    /// The text to classify: `content`, falling back to `comment`.
    ///
    /// Non-string values are rendered as JSON; a missing field yields "".
    pub fn text(&self) -> String {
        ["content", "comment"]
            .iter()
            .filter_map(|key| self.metadata.get(*key))
            .find(|value| !is_blank(value))
            .map(value_to_text)
            .unwrap_or_default()
    }

    /// The `user` field, if present.
    pub fn user(&self) -> String {
        self.metadata.get("user").map(value_to_text).unwrap_or_default()
    }

    /// Converts back to the JSON record shape it was read from.
    pub fn to_json(&self) -> Value {
        let mut fields = Map::with_capacity(self.metadata.len() + 1);
        fields.insert("id".to_string(), self.id.to_json());
        for (key, value) in &self.metadata {
            fields.insert(key.clone(), value.clone());
        }
        Value::Object(fields)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A duplicate-free, ordered set of labels carried by one item.
///
/// Construction skips empty labels and drops repeats, keeping first-seen
/// order. Label text is stored as given: `" a"` and `"a"` are distinct.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Creates an empty label set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a label, returning false if it was empty or already present.
    pub fn insert(&mut self, label: &str) -> bool {
        if label.is_empty() || self.contains(label) {
            return false;
        }
        self.0.push(label.to_string());
        true
    }

    /// Returns true if the set contains `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|existing| existing == label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns true if both sets hold the same labels, in any order.
    pub fn same_labels(&self, other: &LabelSet) -> bool {
        self.len() == other.len() && self.iter().all(|label| other.contains(label))
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        for label in iter {
            set.insert(label.as_ref());
        }
        set
    }
}
