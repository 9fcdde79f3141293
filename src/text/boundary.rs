//! Word-boundary resolution at the cursor.
//!
//! Given a line of text and the cursor's character offset, extract the
//! maximal run of boundary-eligible characters immediately left of the
//! cursor. The completion providers filter candidates against that prefix;
//! an empty prefix means completion is suppressed entirely rather than
//! showing unfiltered candidates.
//!
//! Two boundary policies coexist, selected per provider:
//! - [`BoundaryPolicy::LettersOnly`] — only alphabetic characters, used by
//!   the phrase provider.
//! - [`BoundaryPolicy::Extended`] — letters, digits, `-` and `_`, used by
//!   the hotkey and composite providers so triggers like `ct2` or `f-up`
//!   still match.

use serde::{Deserialize, Serialize};

/// Which characters count as part of the word being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Only alphabetic characters.
    LettersOnly,
    /// Letters, digits, hyphen and underscore.
    Extended,
}

impl BoundaryPolicy {
    fn is_word_char(self, c: char) -> bool {
        match self {
            BoundaryPolicy::LettersOnly => c.is_alphabetic(),
            BoundaryPolicy::Extended => c.is_alphanumeric() || c == '-' || c == '_',
        }
    }
}

/// Returns the prefix immediately left of `cursor` and its start offset.
///
/// `cursor` is a character offset into `line`; offsets past the end of the
/// line are clamped. The returned start offset is also in characters.
pub fn prefix_before_cursor(line: &str, cursor: usize, policy: BoundaryPolicy) -> (String, usize) {
    let chars: Vec<char> = line.chars().collect();
    let cursor = cursor.min(chars.len());

    let mut start = cursor;
    while start > 0 && policy.is_word_char(chars[start - 1]) {
        start -= 1;
    }

    (chars[start..cursor].iter().collect(), start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_word_left_of_cursor() {
        let (prefix, start) = prefix_before_cursor("impression: pneu", 16, BoundaryPolicy::LettersOnly);
        assert_eq!(prefix, "pneu");
        assert_eq!(start, 12);
    }

    #[test]
    fn empty_prefix_after_space() {
        let (prefix, start) = prefix_before_cursor("no acute ", 9, BoundaryPolicy::LettersOnly);
        assert_eq!(prefix, "");
        assert_eq!(start, 9);
    }

    #[test]
    fn letters_only_stops_at_digits() {
        let (prefix, _) = prefix_before_cursor("ct2", 3, BoundaryPolicy::LettersOnly);
        assert_eq!(prefix, "");
    }

    #[test]
    fn extended_includes_digits_hyphen_underscore() {
        let (prefix, start) = prefix_before_cursor("see ct2", 7, BoundaryPolicy::Extended);
        assert_eq!(prefix, "ct2");
        assert_eq!(start, 4);

        let (prefix, _) = prefix_before_cursor("f-up", 4, BoundaryPolicy::Extended);
        assert_eq!(prefix, "f-up");

        let (prefix, _) = prefix_before_cursor("my_key", 6, BoundaryPolicy::Extended);
        assert_eq!(prefix, "my_key");
    }

    #[test]
    fn cursor_mid_word_takes_left_half_only() {
        let (prefix, start) = prefix_before_cursor("contrast", 4, BoundaryPolicy::LettersOnly);
        assert_eq!(prefix, "cont");
        assert_eq!(start, 0);
    }

    #[test]
    fn cursor_past_line_end_is_clamped() {
        let (prefix, _) = prefix_before_cursor("ct", 99, BoundaryPolicy::LettersOnly);
        assert_eq!(prefix, "ct");
    }

    #[test]
    fn empty_line() {
        let (prefix, start) = prefix_before_cursor("", 0, BoundaryPolicy::Extended);
        assert_eq!(prefix, "");
        assert_eq!(start, 0);
    }
}
