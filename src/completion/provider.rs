//! Provider strategies plugged into the editor.
//!
//! One capability trait, three implementations selected at construction:
//! the base phrase provider (letters-only word boundary, vocabulary only),
//! the hotkey-only provider (extended boundary so triggers like `ct2` or
//! `f-up` match), and the composite provider serving all three sources.

use std::sync::Arc;

use crate::completion::aggregator::Completions;
use crate::engine::{CompletionEngine, SourceSet};
use crate::models::EditorState;
use crate::text::boundary::BoundaryPolicy;

/// Capability the editor invokes on each relevant keystroke.
///
/// Implementations never block beyond the configured source wait and
/// degrade to an empty sequence under any internal failure.
pub trait CompletionProvider: Send + Sync {
    fn completions(&self, state: &EditorState) -> Completions;
}

/// Which provider strategy to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Vocabulary phrases only, letters-only boundary.
    Phrase,
    /// Hotkeys only, extended boundary.
    Hotkey,
    /// Phrases, hotkeys and snippets, extended boundary.
    Composite,
}

impl ProviderKind {
    pub(crate) fn boundary_policy(self) -> BoundaryPolicy {
        match self {
            ProviderKind::Phrase => BoundaryPolicy::LettersOnly,
            ProviderKind::Hotkey | ProviderKind::Composite => BoundaryPolicy::Extended,
        }
    }

    pub(crate) fn sources(self) -> SourceSet {
        match self {
            ProviderKind::Phrase => SourceSet {
                tokens: true,
                hotkeys: false,
                snippets: false,
            },
            ProviderKind::Hotkey => SourceSet {
                tokens: false,
                hotkeys: true,
                snippets: false,
            },
            ProviderKind::Composite => SourceSet {
                tokens: true,
                hotkeys: true,
                snippets: true,
            },
        }
    }
}

pub(crate) struct EngineProvider {
    engine: Arc<CompletionEngine>,
    kind: ProviderKind,
}

impl EngineProvider {
    pub(crate) fn new(engine: Arc<CompletionEngine>, kind: ProviderKind) -> Self {
        Self { engine, kind }
    }
}

impl CompletionProvider for EngineProvider {
    fn completions(&self, state: &EditorState) -> Completions {
        self.engine
            .aggregate(state, self.kind.boundary_policy(), self.kind.sources())
    }
}
