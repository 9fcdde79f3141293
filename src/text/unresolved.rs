//! Unresolved-term classification for finished report text.
//!
//! A word is "unresolved" when it fails every resolution rule below. The
//! rule order is a compatibility contract with the editor's red-word
//! highlighting, which applies the same judgment:
//!
//! 1. blank token — skipped;
//! 2. pure integer or decimal — resolved;
//! 3. ISO date (`yyyy-mm-dd`) — resolved;
//! 4. punctuation/symbol-only token — resolved;
//! 5. vocabulary member (case-insensitive) — resolved;
//! 6. participant in a multi-word vocabulary phrase — resolved;
//! 7. otherwise — unresolved.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::phrase_window::{PhraseSet, is_part_of_multi_word_phrase};
use crate::text::tokenizer::tokenize;

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());
static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Returns the distinct, alphabetically sorted unresolved words in `text`.
///
/// Results are lowercased; distinctness and ordering are both
/// case-insensitive. Blank input yields an empty list.
pub fn unresolved_words(text: &str, vocabulary: &PhraseSet) -> Vec<String> {
    let tokens = tokenize(text);
    let words: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();

    let mut unresolved = BTreeSet::new();
    for (index, word) in words.iter().enumerate() {
        if word.trim().is_empty() {
            continue;
        }
        if NUMERIC.is_match(word) || ISO_DATE.is_match(word) {
            continue;
        }
        if word.chars().all(|c| !c.is_alphanumeric()) {
            continue;
        }
        if vocabulary.contains(word) {
            continue;
        }
        if is_part_of_multi_word_phrase(index, &words, vocabulary) {
            continue;
        }
        unresolved.insert(word.clone());
    }

    unresolved.into_iter().collect()
}

/// True iff `text` contains at least one unresolved word.
pub fn has_unresolved_words(text: &str, vocabulary: &PhraseSet) -> bool {
    !unresolved_words(text, vocabulary).is_empty()
}
