//! TF-IDF vectorization over a closed fitted vocabulary

use std::collections::HashMap;

/// One vocabulary term: its feature-vector column and its
/// inverse-document-frequency weight, both fixed at fit time.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TermEntry {
    pub index: usize,
    pub idf: f64,
}

/// Closed term set fixed when the vectorizer was fitted.
///
/// Immutable after load; inference only reads it. Terms absent from
/// the vocabulary carry no signal and are dropped, never an error.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: HashMap<String, TermEntry>,
    dimensions: usize,
}

impl Vocabulary {
    /// Build a vocabulary from fitted term entries.
    ///
    /// The dimension is one past the highest column index; the caller
    /// (the artifact store) has already validated density and range.
    pub fn new(terms: HashMap<String, TermEntry>) -> Self {
        let dimensions = terms.values().map(|t| t.index + 1).max().unwrap_or(0);
        Self { terms, dimensions }
    }

    pub fn get(&self, term: &str) -> Option<TermEntry> {
        self.terms.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Feature-vector dimension (number of columns).
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Sparse numeric encoding of a normalized string.
///
/// Entries are (column, weight) pairs sorted by column; columns not
/// present weigh zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dimensions: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    pub fn zero(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
        }
    }

    /// Build from unsorted (column, weight) pairs, dropping zeros.
    pub fn from_entries(dimensions: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_unstable_by_key(|&(col, _)| col);
        Self {
            dimensions,
            entries,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-zero (column, weight) pairs in column order.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Dot product against a dense weight slice of matching dimension.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        debug_assert_eq!(dense.len(), self.dimensions);
        self.entries
            .iter()
            .map(|&(col, w)| w * dense[col])
            .sum()
    }

    /// Euclidean norm of the vector.
    pub fn l2_norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f64>()
            .sqrt()
    }

    /// Scale to unit Euclidean length; the zero vector is left as-is.
    pub fn l2_normalize(&mut self) {
        let norm = self.l2_norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Capability contract for vectorization: anything turning a normalized
/// string into a fixed-length feature vector.
pub trait Vectorize: Send + Sync {
    fn transform(&self, normalized: &str) -> FeatureVector;

    /// Feature-vector dimension this vectorizer produces.
    fn dimensions(&self) -> usize;
}

/// Fitted TF-IDF term-weighting model.
///
/// `transform` is a pure function of the fixed vocabulary and the
/// input: raw term frequency times the fitted idf weight per matched
/// column, L2-normalized (the convention the artifacts were fitted
/// under). Out-of-vocabulary tokens are silently ignored.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: Vocabulary,
}

impl TfidfVectorizer {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

impl Vectorize for TfidfVectorizer {
    fn transform(&self, normalized: &str) -> FeatureVector {
        let mut counts: HashMap<usize, (f64, f64)> = HashMap::new();
        for token in normalized.split_whitespace() {
            if let Some(entry) = self.vocabulary.get(token) {
                let slot = counts.entry(entry.index).or_insert((0.0, entry.idf));
                slot.0 += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(col, (tf, idf))| (col, tf * idf))
            .collect();

        let mut vector = FeatureVector::from_entries(self.vocabulary.dimensions(), entries);
        vector.l2_normalize();
        vector
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.dimensions()
    }
}
