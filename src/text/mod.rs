//! Text analysis shared by completion and unresolved-word detection:
//! cursor-boundary prefix extraction, tokenization, multi-word phrase
//! window matching, and the unresolved-term classifier built on top.

pub mod boundary;
pub mod phrase_window;
pub mod tokenizer;
pub mod unresolved;

pub use boundary::{BoundaryPolicy, prefix_before_cursor};
pub use phrase_window::{MAX_PHRASE_WINDOW, PhraseSet, is_part_of_multi_word_phrase};
pub use tokenizer::{Token, tokenize};
pub use unresolved::{has_unresolved_words, unresolved_words};
