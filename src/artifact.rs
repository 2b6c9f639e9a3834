//! Trained-model metadata bundle (JSON), consumed only by analytics

use crate::error::{RecError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Auxiliary metadata written by the training pipeline alongside the
/// similarity matrix. Ranking never reads this; analytics reports the
/// feature count from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Names of the features the similarity matrix was computed over.
    #[serde(default)]
    pub similarity_features: Vec<String>,
    /// Free-form training metadata (ignored by the engine).
    #[serde(default)]
    pub trained_at: Option<String>,
}

impl ModelArtifact {
    /// Load the metadata bundle from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(file).map_err(|e| RecError::SerializationError(e.to_string()))
    }

    /// Number of named features; 0 when the artifact carries none.
    pub fn feature_count(&self) -> usize {
        self.similarity_features.len()
    }
}
