//! Fixed English stopword set
//!
//! The NLTK English stopword list, frozen at fit time. The vocabulary
//! artifacts were fitted with this exact set, so it must not change
//! without re-fitting. Tokens reaching the stopword filter are already
//! lowercase and purely alphabetic, so the contraction entries of the
//! original list ("don't", "you're", ...) are represented here by the
//! bare fragments they tokenize into ("don", "t", "you", "re", ...).

use std::collections::HashSet;
use std::sync::OnceLock;

/// NLTK English stopwords, alphabetic forms only.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn",
    "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

/// Set view over [`ENGLISH_STOPWORDS`], built once on first use.
pub fn stopword_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ENGLISH_STOPWORDS.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_matches_list() {
        let set = stopword_set();
        assert_eq!(set.len(), ENGLISH_STOPWORDS.len(), "duplicate entries in list");
        assert!(set.contains("i"));
        assert!(set.contains("the"));
        assert!(set.contains("not"));
        assert!(!set.contains("love"));
    }

    #[test]
    fn entries_are_lowercase_alphabetic() {
        for word in ENGLISH_STOPWORDS {
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "non-alphabetic stopword entry: {word:?}"
            );
        }
    }
}
