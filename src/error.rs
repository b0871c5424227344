use std::path::PathBuf;
use thiserror::Error;

/// The main error type for labelbench operations.
#[derive(Debug, Error)]
pub enum LabelbenchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid input in {path}: {message}")]
    InvalidFile { path: PathBuf, message: String },

    #[error("Unsupported order: '{0}' (supported: asc, desc)")]
    UnsupportedOrder(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Classifier failed: {0}")]
    Classifier(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
