//! Configuration for the predictor and its artifact locations

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tweetsense_core::{Error, Result};

/// Standard tweet character limit enforced by callers.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 280;

/// Predictor configuration: where the fitted artifacts live and the
/// input bound the serving layer enforces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Path to the serialized fitted vectorizer
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,

    /// Path to the serialized fitted classifier
    #[serde(default = "default_classifier_path")]
    pub classifier_path: PathBuf,

    /// Maximum accepted input length, in characters. The pipeline
    /// itself never rejects long input; this is published for the
    /// calling layer's validation.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("models/vectorizer.json")
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from("models/classifier.json")
}

fn default_max_text_length() -> usize {
    DEFAULT_MAX_TEXT_LENGTH
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: default_vectorizer_path(),
            classifier_path: default_classifier_path(),
            max_text_length: default_max_text_length(),
        }
    }
}

impl PredictorConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read config file {path:?}: {e}"))
        })?;
        serde_yaml::from_str(&contents)
            .map_err(|e| Error::config(format!("failed to parse config file {path:?}: {e}")))
    }

    /// Place both artifact paths under `dir`, keeping the file names.
    pub fn with_artifact_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.vectorizer_path = dir.join("vectorizer.json");
        self.classifier_path = dir.join("classifier.json");
        self
    }
}
