//! Multi-word phrase window matching.
//!
//! Decides whether a token participates in a known multi-word phrase by
//! probing contiguous token windows around it, joined with single spaces
//! and compared case-insensitively. Both the unresolved-term classifier and
//! the vocabulary completion data share this notion of a phrase.
//!
//! Windows are capped at [`MAX_PHRASE_WINDOW`] tokens: a vocabulary phrase
//! of more than ten words never resolves its constituent tokens through
//! this matcher. Known limitation, kept as a compatibility contract.

use rustc_hash::FxHashSet;

/// Maximum number of tokens a probed phrase window may span.
pub const MAX_PHRASE_WINDOW: usize = 10;

/// Case-insensitive set of known phrases (single- or multi-word).
#[derive(Debug, Clone, Default)]
pub struct PhraseSet {
    phrases: FxHashSet<String>,
}

impl PhraseSet {
    /// Builds a set from any iterable of phrases; entries are lowercased.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Case-insensitive membership test for a word or space-joined phrase.
    pub fn contains(&self, phrase: &str) -> bool {
        self.phrases.contains(&phrase.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Returns true if the token at `index` is part of any contiguous run of
/// tokens that matches an entry in `phrases`.
///
/// Search order, short-circuiting on the first hit:
/// - forward: windows `[index ..= index + ahead]` for `ahead` in 1..=9;
/// - backward: windows starting up to 9 tokens before `index` and extending
///   through it, up to [`MAX_PHRASE_WINDOW`] tokens long.
///
/// Together these probe every window of length 2..=10 that contains the
/// token anywhere inside it.
pub fn is_part_of_multi_word_phrase(index: usize, words: &[String], phrases: &PhraseSet) -> bool {
    if index >= words.len() || phrases.is_empty() {
        return false;
    }

    // Forward: windows of length 2..=10 anchored at the token.
    for ahead in 1..MAX_PHRASE_WINDOW {
        let end = index + ahead;
        if end >= words.len() {
            break;
        }
        if phrases.contains(&words[index..=end].join(" ")) {
            return true;
        }
    }

    // Backward: windows starting before the token and reaching through it.
    for back in 1..MAX_PHRASE_WINDOW {
        if back > index {
            break;
        }
        let start = index - back;
        for len in back + 1..=MAX_PHRASE_WINDOW {
            if start + len > words.len() {
                break;
            }
            if phrases.contains(&words[start..start + len].join(" ")) {
                return true;
            }
        }
    }

    false
}
