//! Completion candidates handed to the editor.

use serde::{Deserialize, Serialize};

use crate::models::{HotkeyEntry, SnippetEntry};

/// One completion candidate: the text to insert plus a human-readable label.
///
/// The variant tags which source produced it; sources contribute in the
/// fixed order tokens, hotkeys, snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionItem {
    /// A vocabulary phrase.
    Token { insert_text: String, label: String },
    /// A hotkey expansion; the label interpolates trigger and
    /// description-or-expansion.
    Hotkey { insert_text: String, label: String },
    /// A reusable snippet body, labelled by its trigger.
    Snippet { insert_text: String, label: String },
}

impl CompletionItem {
    pub fn token(phrase: &str) -> Self {
        Self::Token {
            insert_text: phrase.to_string(),
            label: phrase.to_string(),
        }
    }

    pub fn hotkey(entry: &HotkeyEntry) -> Self {
        let detail = entry.description.as_deref().unwrap_or(&entry.expansion);
        Self::Hotkey {
            insert_text: entry.expansion.clone(),
            label: format!("{} - {}", entry.trigger, detail),
        }
    }

    pub fn snippet(entry: &SnippetEntry) -> Self {
        Self::Snippet {
            insert_text: entry.display.clone(),
            label: entry.trigger.clone(),
        }
    }

    pub fn insert_text(&self) -> &str {
        match self {
            Self::Token { insert_text, .. }
            | Self::Hotkey { insert_text, .. }
            | Self::Snippet { insert_text, .. } => insert_text,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Token { label, .. }
            | Self::Hotkey { label, .. }
            | Self::Snippet { label, .. } => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotkey_label_prefers_description() {
        let with_description =
            HotkeyEntry::new("fu", "follow-up recommended").with_description("follow-up");
        assert_eq!(CompletionItem::hotkey(&with_description).label(), "fu - follow-up");

        let without = HotkeyEntry::new("fu", "follow-up recommended");
        assert_eq!(
            CompletionItem::hotkey(&without).label(),
            "fu - follow-up recommended"
        );
    }

    #[test]
    fn snippet_inserts_display_text() {
        let entry = SnippetEntry::new("impn", "Impression:\n1. ");
        let item = CompletionItem::snippet(&entry);
        assert_eq!(item.insert_text(), "Impression:\n1. ");
        assert_eq!(item.label(), "impn");
    }
}
