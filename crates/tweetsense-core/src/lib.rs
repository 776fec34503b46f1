//! TweetSense Core
//!
//! Core types and error handling shared across TweetSense components.
//!
//! This crate provides:
//! - The sentiment label and prediction result types
//! - The artifact-loading error taxonomy and result handling
//! - The artifact kind identifiers used in diagnostics

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ArtifactKind, Prediction, SentimentLabel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ArtifactKind, Prediction, SentimentLabel};
}
