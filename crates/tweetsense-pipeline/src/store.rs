//! Artifact store: the one-shot model loading state machine
//!
//! `UNLOADED -> LOADING -> READY` on success, `-> FAILED` on any error.
//! Both terminal states are final; construct a fresh store to retry.
//! None of the failure kinds is retried automatically, because a
//! version-skew failure cannot succeed without re-fitting the model.

use crate::artifact::{strategies, ClassifierPayload, StrategyError, VectorizerPayload};
use crate::classifier::LogisticModel;
use crate::config::PredictorConfig;
use crate::vectorizer::{TfidfVectorizer, Vectorize};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tweetsense_core::{ArtifactKind, Error, Result};

/// Lifecycle state of an [`ArtifactStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

/// The two fitted objects a successful load produces.
///
/// Shared read-only for the process lifetime; `Arc` publication
/// provides the happens-before edge between the load completing and
/// any concurrent reader observing the artifacts.
#[derive(Clone)]
pub struct LoadedArtifacts {
    pub vectorizer: Arc<TfidfVectorizer>,
    pub classifier: Arc<LogisticModel>,
}

/// Obtains the fitted vectorizer and classifier from their artifact
/// files, tolerating cross-version serialization drift.
pub struct ArtifactStore {
    config: PredictorConfig,
    state: StoreState,
    loaded: Option<LoadedArtifacts>,
}

impl ArtifactStore {
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            config,
            state: StoreState::Unloaded,
            loaded: None,
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Load both artifacts, transitioning to READY or FAILED.
    ///
    /// May be called once per store; calling again in any state is
    /// rejected rather than silently re-reading the files.
    pub fn load(&mut self) -> Result<()> {
        if self.state != StoreState::Unloaded {
            return Err(Error::internal(format!(
                "load() called in state {:?}; construct a fresh store to retry",
                self.state
            )));
        }
        self.state = StoreState::Loading;

        match self.load_inner() {
            Ok(artifacts) => {
                tracing::info!(
                    vocabulary = artifacts.vectorizer.vocabulary().len(),
                    dimensions = artifacts.classifier.dimensions(),
                    "artifacts loaded, store is ready"
                );
                self.loaded = Some(artifacts);
                self.state = StoreState::Ready;
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "artifact load failed");
                self.state = StoreState::Failed;
                Err(err)
            }
        }
    }

    fn load_inner(&self) -> Result<LoadedArtifacts> {
        let vectorizer_payload: VectorizerPayload = load_artifact(
            ArtifactKind::Vectorizer,
            &self.config.vectorizer_path,
        )?;
        let vectorizer = vectorizer_payload.into_vectorizer()?;

        let classifier_payload: ClassifierPayload = load_artifact(
            ArtifactKind::Classifier,
            &self.config.classifier_path,
        )?;
        let classifier = classifier_payload.into_model()?;

        // The two artifacts must come from the same fit.
        if classifier.dimensions() != vectorizer.dimensions() {
            return Err(Error::unfitted(
                ArtifactKind::Classifier,
                format!(
                    "weight dimension {} does not match the {}-column vocabulary",
                    classifier.dimensions(),
                    vectorizer.dimensions()
                ),
            ));
        }

        Ok(LoadedArtifacts {
            vectorizer: Arc::new(vectorizer),
            classifier: Arc::new(classifier),
        })
    }

    /// Access the loaded artifacts, or `NotReady` outside READY.
    pub fn artifacts(&self) -> Result<&LoadedArtifacts> {
        match self.state {
            StoreState::Ready => Ok(self
                .loaded
                .as_ref()
                .expect("READY implies artifacts are present")),
            _ => Err(Error::NotReady),
        }
    }
}

/// Run the strategy chain for one artifact file and classify failure.
fn load_artifact<T: DeserializeOwned + 'static>(kind: ArtifactKind, path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::not_found(kind, path));
    }
    let bytes = std::fs::read(path)?;

    let mut incompatible: Option<String> = None;
    let mut last_malformed: Option<String> = None;

    for strategy in strategies::<T>() {
        match strategy.load(kind, &bytes) {
            Ok(payload) => {
                tracing::info!(artifact = %kind, strategy = strategy.name(), "artifact deserialized");
                return Ok(payload);
            }
            Err(StrategyError::Incompatible(detail)) => {
                tracing::warn!(
                    artifact = %kind,
                    strategy = strategy.name(),
                    detail = %detail,
                    "strategy found a version-skewed artifact"
                );
                incompatible = Some(detail);
            }
            Err(StrategyError::Malformed(detail)) => {
                tracing::warn!(
                    artifact = %kind,
                    strategy = strategy.name(),
                    detail = %detail,
                    "strategy could not deserialize artifact"
                );
                last_malformed = Some(detail);
            }
        }
    }

    // Version skew dominates: it is the actionable diagnosis even when
    // a later strategy also failed generically.
    if let Some(detail) = incompatible {
        return Err(Error::incompatible(kind, detail));
    }
    Err(Error::corrupt(
        kind,
        last_malformed.unwrap_or_else(|| "no strategy accepted the artifact".to_string()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_is_unloaded_and_not_ready() {
        let store = ArtifactStore::new(PredictorConfig::default());
        assert_eq!(store.state(), StoreState::Unloaded);
        assert!(matches!(store.artifacts(), Err(Error::NotReady)));
    }

    #[test]
    fn failed_store_rejects_reload() {
        let dir = tempfile::tempdir().unwrap();
        let config = PredictorConfig {
            vectorizer_path: dir.path().join("missing-vectorizer.json"),
            classifier_path: dir.path().join("missing-classifier.json"),
            ..PredictorConfig::default()
        };
        let mut store = ArtifactStore::new(config);
        assert!(store.load().is_err());
        assert_eq!(store.state(), StoreState::Failed);
        assert!(matches!(store.load(), Err(Error::Internal(_))));
        assert!(matches!(store.artifacts(), Err(Error::NotReady)));
    }
}
