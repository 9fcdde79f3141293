//! Multi-source merge of completion candidates.
//!
//! The aggregate result is a [`Completions`] iterator over lazily-run
//! stages, one per source, concatenated in the fixed order tokens, hotkeys,
//! snippets. A stage only executes when the consumer advances into it, so
//! the bounded wait on an asynchronous source is never paid when the UI
//! stops after the first few token candidates. The iterator is not
//! restartable; each keystroke makes a fresh call.

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::completion::item::CompletionItem;
use crate::models::{HotkeyEntry, SnippetEntry};

/// A deferred source contribution, produced only when reached.
pub type Stage = Box<dyn FnOnce() -> Vec<CompletionItem> + Send>;

/// Lazy, non-restartable sequence of completion candidates.
pub struct Completions {
    stages: VecDeque<Stage>,
    current: std::vec::IntoIter<CompletionItem>,
}

impl Completions {
    pub fn empty() -> Self {
        Self {
            stages: VecDeque::new(),
            current: Vec::new().into_iter(),
        }
    }

    pub fn from_stages(stages: Vec<Stage>) -> Self {
        Self {
            stages: stages.into(),
            current: Vec::new().into_iter(),
        }
    }
}

impl Iterator for Completions {
    type Item = CompletionItem;

    fn next(&mut self) -> Option<CompletionItem> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }
            let stage = self.stages.pop_front()?;
            self.current = stage().into_iter();
        }
    }
}

/// Ordering for the token source: length ascending, then case-insensitive
/// lexicographic among equal lengths.
pub fn token_order(a: &str, b: &str) -> Ordering {
    a.chars()
        .count()
        .cmp(&b.chars().count())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

/// Vocabulary phrases whose text starts with `prefix`, case-insensitively,
/// in token order.
pub fn filter_tokens(phrases: &[String], prefix: &str) -> Vec<CompletionItem> {
    let prefix = prefix.to_lowercase();
    let mut matched: Vec<&String> = phrases
        .iter()
        .filter(|phrase| phrase.to_lowercase().starts_with(&prefix))
        .collect();
    matched.sort_by(|a, b| token_order(a.as_str(), b.as_str()));
    matched.into_iter().map(|p| CompletionItem::token(p)).collect()
}

/// Active hotkeys whose trigger starts with `prefix`, case-insensitively.
/// Enumeration order is preserved; no sort is applied.
pub fn filter_hotkeys(entries: &[HotkeyEntry], prefix: &str) -> Vec<CompletionItem> {
    let prefix = prefix.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.active && entry.trigger.to_lowercase().starts_with(&prefix))
        .map(CompletionItem::hotkey)
        .collect()
}

/// Snippets whose trigger starts with `prefix`, case-insensitively, in
/// enumeration order.
pub fn filter_snippets(entries: &[SnippetEntry], prefix: &str) -> Vec<CompletionItem> {
    let prefix = prefix.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.trigger.to_lowercase().starts_with(&prefix))
        .map(CompletionItem::snippet)
        .collect()
}
