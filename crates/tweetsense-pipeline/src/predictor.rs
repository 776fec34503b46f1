//! Predictor: orchestrates the loaded pipeline end to end

use crate::classifier::Classify;
use crate::config::PredictorConfig;
use crate::normalizer::Normalizer;
use crate::store::ArtifactStore;
use crate::vectorizer::Vectorize;
use std::sync::Arc;
use tweetsense_core::{Prediction, Result};

/// Runs raw text through normalization, vectorization, and
/// classification.
///
/// A predictor can only be constructed from a READY artifact store, so
/// once one exists, prediction cannot fail: unknown terms vectorize to
/// zero weight rather than erroring, and the degenerate all-stopword
/// input flows through as the zero vector. The fitted state is
/// immutable and `Predictor` is `Send + Sync`; any number of threads
/// may call [`predict_sentiment`](Self::predict_sentiment)
/// concurrently.
pub struct Predictor {
    normalizer: Normalizer,
    vectorizer: Arc<dyn Vectorize>,
    classifier: Arc<dyn Classify>,
    max_text_length: usize,
}

impl Predictor {
    /// Construct from an already-loaded store.
    ///
    /// Fails with `NotReady` if the store is in any state other than
    /// READY; calling before a successful `load()` is a programming
    /// error, not a recoverable input error.
    pub fn from_store(store: &ArtifactStore, config: &PredictorConfig) -> Result<Self> {
        let artifacts = store.artifacts()?;
        Ok(Self {
            normalizer: Normalizer::new(),
            vectorizer: artifacts.vectorizer.clone(),
            classifier: artifacts.classifier.clone(),
            max_text_length: config.max_text_length,
        })
    }

    /// One-step lifecycle: build a store, load it, and construct the
    /// predictor. Load failure is an initialization failure here, not
    /// a deferred runtime surprise.
    pub fn load(config: PredictorConfig) -> Result<Self> {
        let mut store = ArtifactStore::new(config.clone());
        store.load()?;
        Self::from_store(&store, &config)
    }

    /// Predict the sentiment of `text`.
    ///
    /// Deterministic: identical input yields identical output for the
    /// lifetime of the loaded artifacts. Confidence is the majority
    /// class probability and lies in `[0, 1]`.
    pub fn predict_sentiment(&self, text: &str) -> Prediction {
        let normalized = self.normalizer.normalize(text);
        let vector = self.vectorizer.transform(&normalized);
        let (label, probabilities) = self.classifier.classify(&vector);
        let confidence = f64::max(probabilities[0], probabilities[1]);

        tracing::debug!(
            %label,
            confidence,
            zero_vector = vector.is_zero(),
            "prediction complete"
        );
        Prediction::new(label, confidence)
    }

    /// Input length bound published for the calling layer.
    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }
}

// Manual impl: the trait objects carry no Debug bound and the fitted
// state is too large to dump anyway.
impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("dimensions", &self.vectorizer.dimensions())
            .field("max_text_length", &self.max_text_length)
            .finish_non_exhaustive()
    }
}
