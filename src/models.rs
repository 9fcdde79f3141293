//! Shared data model for the completion and text-quality engine.
//!
//! Everything here is a plain value type: snapshots are immutable once
//! published, and the editor-facing types carry no references back into
//! engine state.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::text::phrase_window::PhraseSet;

/// Opaque tenant key scoping every cache and source query.
///
/// Zero or negative means "no tenant selected"; every lookup short-circuits
/// to empty for such ids.
pub type AccountId = i64;

/// Returns true if the account id denotes a real tenant.
pub fn is_valid_account(account: AccountId) -> bool {
    account > 0
}

/// A user-defined hotkey: short trigger expanded into boilerplate text.
///
/// Only entries with `active == true` are eligible for completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyEntry {
    pub trigger: String,
    pub expansion: String,
    pub description: Option<String>,
    pub active: bool,
}

impl HotkeyEntry {
    pub fn new(trigger: impl Into<String>, expansion: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            expansion: expansion.into(),
            description: None,
            active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A reusable report snippet, keyed by trigger (case-insensitive).
///
/// `structured` is the section-structured form of the snippet body; this
/// crate treats it as opaque and hands it back to the editor untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetEntry {
    pub trigger: String,
    pub display: String,
    pub structured: serde_json::Value,
}

impl SnippetEntry {
    pub fn new(trigger: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            display: display.into(),
            structured: serde_json::Value::Null,
        }
    }
}

/// Editor snapshot handed in on each keystroke: the current line and the
/// cursor's character offset within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub line: String,
    pub cursor: usize,
}

impl EditorState {
    pub fn new(line: impl Into<String>, cursor: usize) -> Self {
        Self {
            line: line.into(),
            cursor,
        }
    }

    /// Cursor placed at the end of the line.
    pub fn at_line_end(line: impl Into<String>) -> Self {
        let line = line.into();
        let cursor = line.chars().count();
        Self { line, cursor }
    }
}

/// One account's vocabulary, published wholesale on each refresh.
///
/// Keeps the phrases in their original casing for completion labels, plus a
/// lowercased lookup set shared with the phrase-window matcher.
#[derive(Debug, Clone)]
pub struct VocabularySnapshot {
    phrases: Vec<String>,
    lookup: PhraseSet,
}

impl VocabularySnapshot {
    pub fn new(phrases: Vec<String>) -> Self {
        let lookup = PhraseSet::new(phrases.iter());
        Self { phrases, lookup }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn lookup(&self) -> &PhraseSet {
        &self.lookup
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// A published snapshot paired with the instant it became ready.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub items: T,
    ready_since: Instant,
}

impl<T> Snapshot<T> {
    pub fn new(items: T) -> Self {
        Self {
            items,
            ready_since: Instant::now(),
        }
    }

    /// Time elapsed since this snapshot was published.
    pub fn age(&self) -> std::time::Duration {
        self.ready_since.elapsed()
    }
}
