//! Word tokenizer shared by unresolved-word detection and phrase matching.
//!
//! The scan is a single left-to-right pass: whitespace and standalone
//! punctuation are skipped, while runs of letters, digits, `-`, `/` and `.`
//! accumulate into one token. Hyphen/slash/dot-joined compounds such as
//! `f/u`, `post-op` or `5.2` therefore stay intact, and a sentence-final
//! dot is stripped from the token it trails.

/// A word-like token with its byte offset range into the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '/' || c == '.'
}

/// Splits `text` into word-like tokens in source order.
///
/// Duplicates are preserved; deduplication is the caller's responsibility.
/// Tokens that are empty after trailing-dot stripping are not emitted, so a
/// bare ellipsis never becomes a token while `--` or `/` runs still do.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;

    let flush = |tokens: &mut Vec<Token>, start: usize, end: usize, text: &str| {
        let raw = &text[start..end];
        let trimmed = raw.trim_end_matches('.');
        if !trimmed.is_empty() {
            tokens.push(Token {
                text: trimmed.to_string(),
                start,
                end: start + trimmed.len(),
            });
        }
    };

    for (idx, c) in text.char_indices() {
        if is_token_char(c) {
            run_start.get_or_insert(idx);
        } else if let Some(start) = run_start.take() {
            flush(&mut tokens, start, idx, text);
        }
    }
    if let Some(start) = run_start {
        flush(&mut tokens, start, text.len(), text);
    }

    tokens
}
