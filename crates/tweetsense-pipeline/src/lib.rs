//! TweetSense Pipeline
//!
//! The sentiment inference pipeline for tweet-length text.
//!
//! Data flows through four stages:
//! raw text -> [`Normalizer`] -> [`TfidfVectorizer`] -> [`LogisticModel`]
//! -> (label, confidence).
//!
//! Fitted artifacts are produced by an offline trainer and loaded once
//! at startup through the [`ArtifactStore`], which tries an ordered list
//! of deserialization strategies and classifies any final failure into
//! an explicit taxonomy instead of crashing opaquely at prediction time.
//! After a successful load the pipeline is immutable and any number of
//! threads may call [`Predictor::predict_sentiment`] concurrently.

pub mod artifact;
pub mod classifier;
pub mod config;
pub mod normalizer;
pub mod predictor;
pub mod stopwords;
pub mod store;
pub mod vectorizer;

pub use artifact::{ClassifierPayload, VectorizerPayload, SCHEMA_VERSION};
pub use classifier::{Classify, LogisticModel};
pub use config::PredictorConfig;
pub use normalizer::Normalizer;
pub use predictor::Predictor;
pub use store::{ArtifactStore, LoadedArtifacts, StoreState};
pub use vectorizer::{FeatureVector, TermEntry, TfidfVectorizer, Vectorize, Vocabulary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classify, LogisticModel};
    pub use crate::config::PredictorConfig;
    pub use crate::normalizer::Normalizer;
    pub use crate::predictor::Predictor;
    pub use crate::store::{ArtifactStore, StoreState};
    pub use crate::vectorizer::{FeatureVector, TfidfVectorizer, Vectorize};
    pub use tweetsense_core::{ArtifactKind, Error, Prediction, Result, SentimentLabel};
}
