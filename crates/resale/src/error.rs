//! Error types for the resale library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for resale operations.
#[derive(Debug, Error)]
pub enum ResaleError {
    /// A label that is not part of a category table.
    #[error("Unknown {table} category: '{label}'")]
    UnknownCategory { table: &'static str, label: String },

    /// The model rejected or could not process an assembled record.
    #[error("Inference error: {0}")]
    Inference(String),

    /// A geospatial record lacks an expected attribute.
    #[error("Region record {index} is missing field '{field}'")]
    MissingField { field: &'static str, index: usize },

    /// A model artifact that does not describe a valid tree.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// A startup resource (model or geodata) is missing or corrupt.
    #[error("Failed to load '{path}': {message}")]
    ResourceLoad { path: PathBuf, message: String },

    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ResaleError {
    /// Build a resource load error for the given path.
    pub fn resource_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ResaleError::ResourceLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error should abort startup rather than a single request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResaleError::ResourceLoad { .. } | ResaleError::Io { .. })
    }
}

/// Result type alias for resale operations.
pub type Result<T> = std::result::Result<T, ResaleError>;
