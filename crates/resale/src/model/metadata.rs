//! Metadata about a loaded model artifact.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the model file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Artifact format.
    pub format: String,
    /// Number of nodes in the tree.
    pub node_count: usize,
    /// Depth of the tree (a single leaf has depth 0).
    pub depth: usize,
    /// When the model was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl ModelMetadata {
    /// Create metadata for a model file that has just been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        node_count: usize,
        depth: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format: "decision-tree-json".to_string(),
            node_count,
            depth,
            loaded_at: Utc::now(),
        }
    }
}
