//! JSON readers and writers for benchmark inputs.
//!
//! Benchmark files come in a handful of shapes:
//! - item lists: `[{"id": 1, "user": "...", "content": "..."}]`
//! - id→labels mappings: `{"1": ["a", "b"]}` or
//!   `[{"id": 1, "labels": ["a", "b"]}]` (label field name configurable)
//! - positional label lists: `[["a"], ["b", "c"], []]`
//! - plain string lists: `["4K export", "natural voice"]`
//!
//! Each shape has a `*_from_value` decoder (no I/O, useful for tests and
//! fuzzing) and a `read_*` wrapper that attaches the file path to errors.
//! Raw label values are normalized here: strings pass through, numbers are
//! rendered as text, a bare label is wrapped into a one-element list and
//! `null` means "no labels". Everything else is rejected.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::ids::{json_type_name, ItemId};
use super::model::Item;
use crate::error::LabelbenchError;

/// Default record field holding an item's labels.
pub const DEFAULT_LABELS_FIELD: &str = "labels";

/// Reads and parses a JSON file into an untyped value.
pub fn read_json_value(path: &Path) -> Result<Value, LabelbenchError> {
    let file = File::open(path).map_err(LabelbenchError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| LabelbenchError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes any serializable value as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), LabelbenchError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path).map_err(LabelbenchError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(|source| LabelbenchError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an item list from a JSON file.
pub fn read_items(path: &Path) -> Result<Vec<Item>, LabelbenchError> {
    let value = read_json_value(path)?;
    items_from_value(&value).map_err(|err| attach_path(err, path))
}

/// Writes an item list back to JSON in its source record shape.
pub fn write_items(path: &Path, items: &[Item]) -> Result<(), LabelbenchError> {
    let records: Vec<Value> = items.iter().map(Item::to_json).collect();
    write_json(path, &records)
}

/// Decodes an item list from a JSON array of objects.
pub fn items_from_value(value: &Value) -> Result<Vec<Item>, LabelbenchError> {
    expect_array(value, "item list")?
        .iter()
        .enumerate()
        .map(|(idx, record)| Item::from_json(record).map_err(|err| at_index(err, idx)))
        .collect()
}

/// Decodes an item list from raw bytes.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation overhead.
pub fn items_from_slice(bytes: &[u8]) -> Result<Vec<Item>, LabelbenchError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| LabelbenchError::InvalidInput(err.to_string()))?;
    items_from_value(&value)
}

/// Reads an id→labels mapping from a JSON file.
pub fn read_id2labels(
    path: &Path,
    labels_field: &str,
) -> Result<Vec<(ItemId, Vec<String>)>, LabelbenchError> {
    let value = read_json_value(path)?;
    id2labels_from_value(&value, labels_field).map_err(|err| attach_path(err, path))
}

/// Decodes an id→labels mapping.
///
/// Accepts an object keyed by id or an array of records carrying `id` and
/// `labels_field`. Pairs are returned in the order they appear in the input.
pub fn id2labels_from_value(
    value: &Value,
    labels_field: &str,
) -> Result<Vec<(ItemId, Vec<String>)>, LabelbenchError> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, labels)| {
                let labels = label_list_from_value(labels).map_err(|err| at_key(err, key))?;
                Ok((ItemId::from_key(key), labels))
            })
            .collect(),
        Value::Array(records) => records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                record_labels(record, labels_field).map_err(|err| at_index(err, idx))
            })
            .collect(),
        other => Err(LabelbenchError::InvalidInput(format!(
            "id→labels mapping must be an object or an array, got {}",
            json_type_name(other)
        ))),
    }
}

/// Decodes an id→labels mapping from raw bytes.
pub fn id2labels_from_slice(
    bytes: &[u8],
    labels_field: &str,
) -> Result<Vec<(ItemId, Vec<String>)>, LabelbenchError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| LabelbenchError::InvalidInput(err.to_string()))?;
    id2labels_from_value(&value, labels_field)
}

fn record_labels(
    record: &Value,
    labels_field: &str,
) -> Result<(ItemId, Vec<String>), LabelbenchError> {
    let Value::Object(fields) = record else {
        return Err(LabelbenchError::InvalidInput(format!(
            "record must be an object, got {}",
            json_type_name(record)
        )));
    };
    let id = fields
        .get("id")
        .ok_or_else(|| LabelbenchError::InvalidInput("record has no 'id' field".to_string()))
        .and_then(ItemId::from_json)?;
    let labels = match fields.get(labels_field) {
        Some(raw) => label_list_from_value(raw)?,
        None => Vec::new(),
    };
    Ok((id, labels))
}

/// Reads a list of item ids.
pub fn read_id_list(path: &Path) -> Result<Vec<ItemId>, LabelbenchError> {
    let value = read_json_value(path)?;
    id_list_from_value(&value).map_err(|err| attach_path(err, path))
}

/// Decodes a JSON array of ids; records contribute their `id` field.
pub fn id_list_from_value(value: &Value) -> Result<Vec<ItemId>, LabelbenchError> {
    expect_array(value, "id list")?
        .iter()
        .enumerate()
        .map(|(idx, entry)| entry_id(entry).map_err(|err| at_index(err, idx)))
        .collect()
}

fn entry_id(entry: &Value) -> Result<ItemId, LabelbenchError> {
    match entry {
        Value::Object(fields) => fields
            .get("id")
            .ok_or_else(|| LabelbenchError::InvalidInput("record has no 'id' field".to_string()))
            .and_then(ItemId::from_json),
        other => ItemId::from_json(other),
    }
}

/// Reads positional label lists (one list per input text).
pub fn read_label_lists(path: &Path) -> Result<Vec<Vec<String>>, LabelbenchError> {
    let value = read_json_value(path)?;
    label_lists_from_value(&value).map_err(|err| attach_path(err, path))
}

/// Decodes positional label lists from a JSON array.
pub fn label_lists_from_value(value: &Value) -> Result<Vec<Vec<String>>, LabelbenchError> {
    expect_array(value, "label lists")?
        .iter()
        .enumerate()
        .map(|(idx, entry)| label_list_from_value(entry).map_err(|err| at_index(err, idx)))
        .collect()
}

/// Reads a flat list of strings (extracted items, categories).
pub fn read_string_list(path: &Path) -> Result<Vec<String>, LabelbenchError> {
    let value = read_json_value(path)?;
    string_list_from_value(&value).map_err(|err| attach_path(err, path))
}

/// Decodes a flat list of strings; `null` entries are skipped.
pub fn string_list_from_value(value: &Value) -> Result<Vec<String>, LabelbenchError> {
    let mut out = Vec::new();
    for (idx, entry) in expect_array(value, "string list")?.iter().enumerate() {
        if let Some(text) = scalar_text(entry).map_err(|err| at_index(err, idx))? {
            out.push(text);
        }
    }
    Ok(out)
}

/// Normalizes one raw label value into a list of label strings.
pub fn label_list_from_value(value: &Value) -> Result<Vec<String>, LabelbenchError> {
    match value {
        Value::Array(entries) => {
            let mut labels = Vec::with_capacity(entries.len());
            for entry in entries {
                if let Some(label) = scalar_text(entry)? {
                    labels.push(label);
                }
            }
            Ok(labels)
        }
        other => Ok(scalar_text(other)?.into_iter().collect()),
    }
}

fn scalar_text(value: &Value) -> Result<Option<String>, LabelbenchError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(LabelbenchError::InvalidInput(format!(
            "unsupported label type: {}",
            json_type_name(other)
        ))),
    }
}

fn expect_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>, LabelbenchError> {
    value.as_array().ok_or_else(|| {
        LabelbenchError::InvalidInput(format!(
            "{what} must be a JSON array, got {}",
            json_type_name(value)
        ))
    })
}

fn at_index(err: LabelbenchError, idx: usize) -> LabelbenchError {
    match err {
        LabelbenchError::InvalidInput(message) => {
            LabelbenchError::InvalidInput(format!("entry {idx}: {message}"))
        }
        other => other,
    }
}

fn at_key(err: LabelbenchError, key: &str) -> LabelbenchError {
    match err {
        LabelbenchError::InvalidInput(message) => {
            LabelbenchError::InvalidInput(format!("key '{key}': {message}"))
        }
        other => other,
    }
}

fn attach_path(err: LabelbenchError, path: &Path) -> LabelbenchError {
    match err {
        LabelbenchError::InvalidInput(message) => LabelbenchError::InvalidFile {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    }
}
