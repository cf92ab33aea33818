//! Keyword extraction: tokenize, drop stopwords and short tokens, dedupe.

use std::collections::BTreeSet;
use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::tokenize;

/// NLTK English stopword list. Bare contraction fragments ("couldn",
/// "wasn", ...) matter here: the tokenizer splits "couldn't" into
/// "couldn" + "t", and the longer fragment survives the length filter.
const STOPWORD_LIST: &[&str] = &[
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

// Materialized once per process and read-only thereafter; safe for any
// number of concurrent readers.
static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORD_LIST.iter().copied().collect());

/// The extraction predicate. Every token in a [`KeywordSet`] satisfies it:
/// lowercase ASCII letters only, longer than 3 characters, not all digits,
/// not a stopword. The all-digit check cannot trigger with the current
/// letters-only tokenizer; it guards against future tokenizer changes.
fn is_keyword(token: &str) -> bool {
    token.len() > 3
        && token.chars().all(|c| c.is_ascii_lowercase())
        && !token.chars().all(|c| c.is_ascii_digit())
        && !STOPWORDS.contains(token)
}

/// A deduplicated set of significant keywords.
///
/// Backed by a `BTreeSet` so iteration and serialization are always
/// lexicographically sorted — externally observable output never depends
/// on hash order. The only construction paths are [`extract_keywords`]
/// and deserialization, and both apply the extraction predicate, so the
/// set can never hold a nonconforming token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Sorted iteration (BTreeSet order).
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

/// Client-supplied keyword lists are re-run through the extraction
/// pipeline: entries are tokenized and filtered, so a caller cannot
/// smuggle an uppercase, short, or stopword token into a set.
impl From<Vec<String>> for KeywordSet {
    fn from(raw: Vec<String>) -> Self {
        KeywordSet(
            raw.iter()
                .flat_map(|entry| tokenize(entry))
                .filter(|t| is_keyword(t))
                .collect(),
        )
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.0.into_iter().collect()
    }
}

/// Extracts the keyword set from arbitrary text.
///
/// Infallible: text with no significant words yields an empty set, which
/// downstream logic treats normally (an empty set matches nothing).
pub fn extract_keywords(text: &str) -> KeywordSet {
    KeywordSet(
        tokenize(text)
            .into_iter()
            .filter(|t| is_keyword(t))
            .collect(),
    )
}
