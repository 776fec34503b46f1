//! Binary logistic classification over feature vectors

use crate::vectorizer::FeatureVector;
use tweetsense_core::SentimentLabel;

/// Probability distribution over {negative, positive}, summing to 1.
pub type ClassProbabilities = [f64; 2];

/// Capability contract for classification: anything turning a feature
/// vector into a label and a class-probability distribution.
pub trait Classify: Send + Sync {
    fn classify(&self, vector: &FeatureVector) -> (SentimentLabel, ClassProbabilities);
}

/// Fitted binary logistic-regression model.
///
/// Deterministic given fixed coefficients: the positive-class
/// probability is `sigmoid(w . x + b)`, the label is the majority
/// class under the fitted decision threshold. Immutable after load.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    weights: Vec<f64>,
    intercept: f64,
    threshold: f64,
}

impl LogisticModel {
    pub fn new(weights: Vec<f64>, intercept: f64, threshold: f64) -> Self {
        Self {
            weights,
            intercept,
            threshold,
        }
    }

    /// Number of feature columns the model was fitted on.
    pub fn dimensions(&self) -> usize {
        self.weights.len()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn sigmoid(z: f64) -> f64 {
        1.0 / (1.0 + (-z).exp())
    }
}

impl Classify for LogisticModel {
    fn classify(&self, vector: &FeatureVector) -> (SentimentLabel, ClassProbabilities) {
        let z = vector.dot(&self.weights) + self.intercept;
        let p_positive = Self::sigmoid(z);
        let label = if p_positive >= self.threshold {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };
        (label, [1.0 - p_positive, p_positive])
    }
}
