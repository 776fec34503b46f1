//! Deterministic text normalization
//!
//! Canonicalizes raw text into the token form the vectorizer was fitted
//! on. The step order is part of the artifact contract and must not be
//! reordered: strip non-alphabetic characters to spaces, lowercase,
//! split, drop stopwords, stem, re-join.

use crate::stopwords::stopword_set;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// Pure text-transform from raw input to normalized token string.
///
/// Total function: never fails, for any UTF-8 input. Input with no
/// alphabetic characters, or consisting only of stopwords, normalizes
/// to the empty string, which is a valid degenerate output and flows
/// through vectorization as the all-zero feature vector.
pub struct Normalizer {
    non_alpha: Regex,
    stemmer: Stemmer,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            // [^a-zA-Z] also covers non-ASCII: every such byte sequence
            // becomes a token boundary.
            non_alpha: Regex::new("[^a-zA-Z]+").expect("static pattern"),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Normalize `text` into the canonical stemmed token string.
    pub fn normalize(&self, text: &str) -> String {
        let alphabetic = self.non_alpha.replace_all(text, " ");
        let lowered = alphabetic.to_lowercase();

        let stopwords = stopword_set();
        let mut tokens = Vec::new();
        for word in lowered.split_whitespace() {
            if stopwords.contains(word) {
                continue;
            }
            tokens.push(self.stemmer.stem(word).into_owned());
        }

        tokens.join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
