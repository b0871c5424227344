use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, serde_json::to_vec_pretty(value).expect("serialize fixture"))
        .expect("write fixture");
    path
}

/// Four comments; ids 1 and 2 are worth keeping.
pub fn comments() -> Value {
    json!([
        {"id": 1, "user": "ann", "content": "Love the new export"},
        {"id": 2, "user": "bob", "content": "Crashes on\nstartup"},
        {"id": 3, "user": "cy", "content": "buy followers now"},
        {"id": 4, "user": "dee", "comment": "first!"},
    ])
}

pub fn id2labels() -> Value {
    json!({
        "1": ["speed", "export"],
        "2": ["export"],
        "3": ["speed", "export", "export"],
        "4": [],
        "5": ["pricing"],
    })
}
