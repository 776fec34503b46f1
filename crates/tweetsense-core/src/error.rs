//! Error types for TweetSense

use crate::types::ArtifactKind;
use std::path::PathBuf;

/// Result type alias using TweetSense's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for TweetSense operations.
///
/// All artifact variants are fatal at startup and are never retried:
/// a version-skew failure cannot succeed on retry without re-fitting
/// the model, so the loader surfaces it once and stops.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Artifact file absent at the configured path
    #[error("{artifact} artifact not found at {path:?}")]
    NotFound {
        artifact: ArtifactKind,
        path: PathBuf,
    },

    /// Artifact was serialized by a different toolchain version
    #[error(
        "{artifact} artifact is incompatible with this toolchain: {detail}. \
         Re-fit the model and re-export it with the current trainer"
    )]
    IncompatibleArtifact {
        artifact: ArtifactKind,
        detail: String,
    },

    /// Artifact bytes could not be deserialized by any strategy
    #[error("{artifact} artifact is corrupt: {detail}")]
    CorruptArtifact {
        artifact: ArtifactKind,
        detail: String,
    },

    /// Artifact deserialized but is not a fitted model
    #[error("{artifact} artifact is not fitted: {detail}")]
    UnfittedArtifact {
        artifact: ArtifactKind,
        detail: String,
    },

    /// Prediction requested before artifacts reached the ready state
    #[error("predictor is not ready: artifacts have not been loaded")]
    NotReady,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new not-found error for an artifact path
    pub fn not_found(artifact: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            artifact,
            path: path.into(),
        }
    }

    /// Create a new incompatible-artifact error
    pub fn incompatible(artifact: ArtifactKind, detail: impl Into<String>) -> Self {
        Self::IncompatibleArtifact {
            artifact,
            detail: detail.into(),
        }
    }

    /// Create a new corrupt-artifact error
    pub fn corrupt(artifact: ArtifactKind, detail: impl Into<String>) -> Self {
        Self::CorruptArtifact {
            artifact,
            detail: detail.into(),
        }
    }

    /// Create a new unfitted-artifact error
    pub fn unfitted(artifact: ArtifactKind, detail: impl Into<String>) -> Self {
        Self::UnfittedArtifact {
            artifact,
            detail: detail.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
