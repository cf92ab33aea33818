//! Text to word tokenization: lowercase, split on runs of ASCII letters.

/// Splits text into lowercase word tokens.
///
/// A token is a maximal run of ASCII letters; digits, punctuation,
/// whitespace, and symbols are separators and never part of a token.
/// Tokens come back in first-occurrence order, duplicates included —
/// deduplication is the keyword extractor's job.
///
/// Never fails: input with no letters yields an empty vec.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphabetic() {
            current.push(ch.to_ascii_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
