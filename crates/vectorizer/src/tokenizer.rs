//! Word tokenizer for course text.

use crate::stop_words::is_stop_word;

/// Minimum token length in characters
const MIN_TOKEN_CHARS: usize = 2;

/// Tokenize text into lowercase word tokens, stop words removed.
///
/// A word is a run of alphanumeric characters or `_`. Single-character
/// words are dropped. Order and repeats are preserved so callers can count
/// term frequency.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|word| !is_stop_word(word))
        .map(String::from)
        .collect()
}
