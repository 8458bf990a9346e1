// Tokenization — raw text to a filtered sequence of normalized tokens.
//
// Each whitespace-delimited word is lowercased and stripped of ASCII
// punctuation. Words that end up empty, or that sit in the stop-word set,
// are dropped. Surviving tokens keep their order of appearance, so the
// same input always yields the same sequence.

use std::collections::HashSet;

/// Tokenize raw text into normalized, stop-word-filtered tokens.
///
/// There are no error conditions: malformed input is handled best-effort
/// (the caller already decoded bytes lossily), and an all-punctuation or
/// all-stop-word text simply produces an empty sequence.
pub fn tokenize(raw: &str, stop_words: &HashSet<String>) -> Vec<String> {
    raw.split_whitespace()
        .filter_map(|word| {
            let token: String = word
                .to_lowercase()
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .collect();
            if token.is_empty() || stop_words.contains(&token) {
                None
            } else {
                Some(token)
            }
        })
        .collect()
}
