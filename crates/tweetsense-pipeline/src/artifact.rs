//! Artifact schemas and deserialization strategies
//!
//! Fitted models arrive as opaque files written by an offline trainer
//! whose toolchain version drifts relative to the serving process.
//! Loading therefore walks an ordered list of strategies, first success
//! wins:
//!
//! 1. [`EnvelopeJson`] — the primary format: a JSON envelope carrying a
//!    schema version and a typed payload.
//! 2. [`LegacyYaml`] — the v1 trainer's bare YAML payload, decoded with
//!    lossy UTF-8 recovery for pre-unicode exports.
//!
//! Strategy failures keep the distinction between "this artifact comes
//! from a different toolchain version" and "these bytes are garbage",
//! so the store can classify the final failure instead of collapsing
//! everything into one opaque error.

use crate::classifier::LogisticModel;
use crate::vectorizer::{TermEntry, TfidfVectorizer, Vocabulary};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tweetsense_core::{ArtifactKind, Error, Result};

/// Format marker written into every primary-format envelope.
pub const ARTIFACT_FORMAT: &str = "tweetsense.artifact";

/// Envelope schema version this build reads and writes.
pub const SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Deserialize)]
struct Envelope {
    format: String,
    schema_version: u32,
    #[serde(default)]
    kind: Option<ArtifactKind>,
    #[serde(default)]
    produced_by: Option<String>,
    payload: serde_json::Value,
}

/// Serialized form of a fitted vectorizer.
///
/// All fields default so that a validly-serialized but unrelated
/// document deserializes to an empty payload and is rejected by the
/// fitted check, rather than failing with a misleading parse error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VectorizerPayload {
    #[serde(default)]
    pub vocabulary: HashMap<String, TermEntry>,
}

impl VectorizerPayload {
    /// Adapt the payload to the fitted vectorizer contract, failing
    /// fast if it is an unfitted placeholder or internally broken.
    pub fn into_vectorizer(self) -> Result<TfidfVectorizer> {
        let kind = ArtifactKind::Vectorizer;
        if self.vocabulary.is_empty() {
            return Err(Error::unfitted(kind, "vocabulary is empty"));
        }

        let dims = self.vocabulary.len();
        let mut seen = HashSet::with_capacity(dims);
        for (term, entry) in &self.vocabulary {
            if entry.index >= dims {
                return Err(Error::unfitted(
                    kind,
                    format!(
                        "term {term:?} has column {} outside the {dims}-column vocabulary",
                        entry.index
                    ),
                ));
            }
            if !seen.insert(entry.index) {
                return Err(Error::unfitted(
                    kind,
                    format!("column {} is assigned to more than one term", entry.index),
                ));
            }
            if !entry.idf.is_finite() {
                return Err(Error::unfitted(
                    kind,
                    format!("term {term:?} has non-finite idf weight"),
                ));
            }
        }

        Ok(TfidfVectorizer::new(Vocabulary::new(self.vocabulary)))
    }
}

/// Serialized form of a fitted binary classifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifierPayload {
    #[serde(default)]
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl Default for ClassifierPayload {
    fn default() -> Self {
        Self {
            weights: Vec::new(),
            intercept: 0.0,
            threshold: default_threshold(),
        }
    }
}

impl ClassifierPayload {
    /// Adapt the payload to the fitted classifier contract.
    pub fn into_model(self) -> Result<LogisticModel> {
        let kind = ArtifactKind::Classifier;
        if self.weights.is_empty() {
            return Err(Error::unfitted(kind, "weight vector is empty"));
        }
        if !self.weights.iter().all(|w| w.is_finite()) {
            return Err(Error::unfitted(kind, "weight vector has non-finite entries"));
        }
        if !self.intercept.is_finite() {
            return Err(Error::unfitted(kind, "intercept is non-finite"));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::unfitted(
                kind,
                format!("decision threshold {} is outside [0, 1]", self.threshold),
            ));
        }
        Ok(LogisticModel::new(self.weights, self.intercept, self.threshold))
    }
}

/// Wrap a payload in a current-version envelope.
///
/// Used by the trainer-side export path and by tests producing fixture
/// artifacts.
pub fn wrap_payload<T: Serialize>(kind: ArtifactKind, payload: &T) -> serde_json::Value {
    serde_json::json!({
        "format": ARTIFACT_FORMAT,
        "schema_version": SCHEMA_VERSION,
        "kind": kind,
        "produced_by": concat!("tweetsense ", env!("CARGO_PKG_VERSION")),
        "payload": payload,
    })
}

/// Why a single strategy failed to produce a payload.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// The bytes are a recognized artifact from a different toolchain
    /// version; retrying other strategies cannot fix this.
    #[error("incompatible artifact: {0}")]
    Incompatible(String),
    /// The bytes do not parse under this strategy.
    #[error("malformed artifact: {0}")]
    Malformed(String),
}

/// One deserialization strategy in the fallback chain.
pub trait LoadStrategy<T>: Send + Sync {
    fn name(&self) -> &'static str;

    fn load(&self, kind: ArtifactKind, bytes: &[u8]) -> std::result::Result<T, StrategyError>;
}

/// Primary format: versioned JSON envelope.
pub struct EnvelopeJson;

impl<T: DeserializeOwned> LoadStrategy<T> for EnvelopeJson {
    fn name(&self) -> &'static str {
        "envelope-json"
    }

    fn load(&self, kind: ArtifactKind, bytes: &[u8]) -> std::result::Result<T, StrategyError> {
        let envelope: Envelope = serde_json::from_slice(bytes)
            .map_err(|e| StrategyError::Malformed(format!("not a JSON envelope: {e}")))?;

        if envelope.format != ARTIFACT_FORMAT {
            return Err(StrategyError::Malformed(format!(
                "unrecognized envelope format {:?}",
                envelope.format
            )));
        }
        if envelope.schema_version != SCHEMA_VERSION {
            let producer = envelope
                .produced_by
                .unwrap_or_else(|| "an unknown toolchain".to_string());
            return Err(StrategyError::Incompatible(format!(
                "schema version {} (written by {producer}) is not the supported version {SCHEMA_VERSION}",
                envelope.schema_version
            )));
        }
        if let Some(declared) = envelope.kind {
            if declared != kind {
                return Err(StrategyError::Malformed(format!(
                    "envelope declares kind {declared}, expected {kind}"
                )));
            }
        }

        serde_json::from_value(envelope.payload)
            .map_err(|e| StrategyError::Malformed(format!("envelope payload rejected: {e}")))
    }
}

/// Fallback format: the v1 trainer's bare YAML payload.
///
/// Decodes with lossy UTF-8 recovery because v1 exports predate the
/// trainer's unicode cleanup. Refuses to reinterpret a primary-format
/// envelope as a bare payload, so envelope failures keep their own
/// classification.
pub struct LegacyYaml;

impl<T: DeserializeOwned> LoadStrategy<T> for LegacyYaml {
    fn name(&self) -> &'static str {
        "legacy-yaml"
    }

    fn load(&self, _kind: ArtifactKind, bytes: &[u8]) -> std::result::Result<T, StrategyError> {
        let text = String::from_utf8_lossy(bytes);

        let doc: serde_yaml::Value = serde_yaml::from_str(&text)
            .map_err(|e| StrategyError::Malformed(format!("not a legacy YAML document: {e}")))?;
        // Empty input parses as null; a payload is always a mapping.
        if !doc.is_mapping() {
            return Err(StrategyError::Malformed(
                "legacy payload is not a YAML mapping".to_string(),
            ));
        }
        if doc.get("format").and_then(|v| v.as_str()) == Some(ARTIFACT_FORMAT) {
            return Err(StrategyError::Malformed(
                "document is a primary-format envelope, not a legacy payload".to_string(),
            ));
        }

        serde_yaml::from_value(doc)
            .map_err(|e| StrategyError::Malformed(format!("legacy payload rejected: {e}")))
    }
}

/// The ordered strategy chain for one payload type.
pub fn strategies<T: DeserializeOwned + 'static>() -> [&'static dyn LoadStrategy<T>; 2] {
    [&EnvelopeJson, &LegacyYaml]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer_json() -> Vec<u8> {
        let payload = VectorizerPayload {
            vocabulary: HashMap::from([
                ("love".to_string(), TermEntry { index: 0, idf: 1.0 }),
                ("hate".to_string(), TermEntry { index: 1, idf: 1.2 }),
            ]),
        };
        serde_json::to_vec(&wrap_payload(ArtifactKind::Vectorizer, &payload)).unwrap()
    }

    #[test]
    fn envelope_round_trip() {
        let bytes = vectorizer_json();
        let payload: VectorizerPayload = EnvelopeJson
            .load(ArtifactKind::Vectorizer, &bytes)
            .unwrap();
        assert_eq!(payload.vocabulary.len(), 2);
    }

    #[test]
    fn future_schema_version_is_incompatible() {
        let mut doc: serde_json::Value = serde_json::from_slice(&vectorizer_json()).unwrap();
        doc["schema_version"] = serde_json::json!(SCHEMA_VERSION + 1);
        doc["produced_by"] = serde_json::json!("tweetsense 9.0");
        let bytes = serde_json::to_vec(&doc).unwrap();

        let err = <EnvelopeJson as LoadStrategy<VectorizerPayload>>::load(
            &EnvelopeJson,
            ArtifactKind::Vectorizer,
            &bytes,
        )
        .unwrap_err();
        match err {
            StrategyError::Incompatible(detail) => {
                assert!(detail.contains("tweetsense 9.0"), "{detail}");
            }
            other => panic!("expected Incompatible, got {other:?}"),
        }
    }

    #[test]
    fn kind_mismatch_is_malformed() {
        let bytes = vectorizer_json();
        let err = <EnvelopeJson as LoadStrategy<ClassifierPayload>>::load(
            &EnvelopeJson,
            ArtifactKind::Classifier,
            &bytes,
        )
        .unwrap_err();
        assert!(matches!(err, StrategyError::Malformed(_)));
    }

    #[test]
    fn legacy_yaml_reads_bare_payloads() {
        let yaml = b"weights: [0.5, -0.5]\nintercept: 0.1\n";
        let payload: ClassifierPayload =
            LegacyYaml.load(ArtifactKind::Classifier, yaml).unwrap();
        assert_eq!(payload.weights, vec![0.5, -0.5]);
        assert_eq!(payload.threshold, 0.5);
    }

    #[test]
    fn legacy_yaml_recovers_from_invalid_utf8() {
        let mut yaml = b"weights: [1.0]\nintercept: 0.0\n# trained by Jos".to_vec();
        yaml.push(0xE9); // latin-1 'e' in a trailing comment
        let payload: ClassifierPayload =
            LegacyYaml.load(ArtifactKind::Classifier, &yaml).unwrap();
        assert_eq!(payload.weights, vec![1.0]);
    }

    #[test]
    fn legacy_yaml_refuses_primary_envelopes() {
        let bytes = vectorizer_json();
        let err = <LegacyYaml as LoadStrategy<VectorizerPayload>>::load(
            &LegacyYaml,
            ArtifactKind::Vectorizer,
            &bytes,
        )
        .unwrap_err();
        assert!(matches!(err, StrategyError::Malformed(_)));
    }

    #[test]
    fn empty_input_is_malformed_under_both_strategies() {
        for strategy in strategies::<VectorizerPayload>() {
            let err = strategy.load(ArtifactKind::Vectorizer, b"").unwrap_err();
            assert!(
                matches!(err, StrategyError::Malformed(_)),
                "strategy {}",
                strategy.name()
            );
        }
    }

    #[test]
    fn legacy_yaml_rejects_non_mapping_documents() {
        // Null (including the empty file), scalars, and sequences all
        // parse as YAML but are not payloads.
        for doc in [&b""[..], b"null", b"42", b"- love\n- hate\n"] {
            let err = <LegacyYaml as LoadStrategy<VectorizerPayload>>::load(
                &LegacyYaml,
                ArtifactKind::Vectorizer,
                doc,
            )
            .unwrap_err();
            assert!(
                matches!(err, StrategyError::Malformed(_)),
                "document {:?}",
                String::from_utf8_lossy(doc)
            );
        }
    }

    #[test]
    fn unrelated_object_deserializes_empty_and_fails_fitted_check() {
        let bytes = br#"{"name": "not a model", "id": 7}"#;
        let payload: VectorizerPayload =
            LegacyYaml.load(ArtifactKind::Vectorizer, bytes).unwrap();
        let err = payload.into_vectorizer().unwrap_err();
        assert!(matches!(
            err,
            tweetsense_core::Error::UnfittedArtifact { .. }
        ));
    }

    #[test]
    fn fitted_check_rejects_sparse_column_assignments() {
        let payload = VectorizerPayload {
            vocabulary: HashMap::from([
                ("love".to_string(), TermEntry { index: 0, idf: 1.0 }),
                ("hate".to_string(), TermEntry { index: 5, idf: 1.0 }),
            ]),
        };
        assert!(payload.into_vectorizer().is_err());
    }

    #[test]
    fn fitted_check_rejects_empty_weights() {
        let err = ClassifierPayload::default().into_model().unwrap_err();
        assert!(matches!(
            err,
            tweetsense_core::Error::UnfittedArtifact { .. }
        ));
    }
}
