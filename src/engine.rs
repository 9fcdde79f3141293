//! Engine facade wiring sources, caches and prefetchers together.
//!
//! One [`CompletionEngine`] is built at editor initialization and shared
//! behind an `Arc`. It owns the three per-source caches, hands out
//! completion providers, and exposes the unresolved-word entry points used
//! by report export. Nothing here ever propagates an error or a panic into
//! the editor: fetch failures are absorbed by the refresh tasks, missing
//! context degrades to empty results.

use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use crate::cache::SourceCache;
use crate::completion::aggregator::{
    Completions, Stage, filter_hotkeys, filter_snippets, filter_tokens,
};
use crate::completion::provider::{CompletionProvider, EngineProvider, ProviderKind};
use crate::config::EngineConfig;
use crate::models::{
    AccountId, EditorState, HotkeyEntry, SnippetEntry, VocabularySnapshot, is_valid_account,
};
use crate::prefetch::Prefetcher;
use crate::sources::{AccountContext, HotkeySource, PhraseSource, SnippetSource, SourceError};
use crate::text::boundary::{BoundaryPolicy, prefix_before_cursor};
use crate::text::phrase_window::PhraseSet;
use crate::text::unresolved;

/// Which sources a provider strategy draws from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceSet {
    pub tokens: bool,
    pub hotkeys: bool,
    pub snippets: bool,
}

/// Shared completion and text-quality engine for one editor process.
pub struct CompletionEngine {
    config: EngineConfig,
    accounts: Arc<dyn AccountContext>,
    phrases: Arc<dyn PhraseSource>,
    hotkeys: Arc<dyn HotkeySource>,
    snippets: Arc<dyn SnippetSource>,

    vocabulary_cache: Arc<SourceCache<VocabularySnapshot>>,
    hotkey_cache: Arc<SourceCache<Vec<HotkeyEntry>>>,
    snippet_cache: Arc<SourceCache<Vec<SnippetEntry>>>,

    vocabulary_prefetch: Arc<Prefetcher<VocabularySnapshot>>,
    hotkey_prefetch: Arc<Prefetcher<Vec<HotkeyEntry>>>,
    snippet_prefetch: Arc<Prefetcher<Vec<SnippetEntry>>>,
}

impl CompletionEngine {
    /// Builds the engine on the given runtime handle. Background refreshes
    /// are spawned onto that runtime's worker pool.
    pub fn new(
        accounts: Arc<dyn AccountContext>,
        phrases: Arc<dyn PhraseSource>,
        hotkeys: Arc<dyn HotkeySource>,
        snippets: Arc<dyn SnippetSource>,
        config: EngineConfig,
        handle: Handle,
    ) -> Arc<Self> {
        let vocabulary_cache = Arc::new(SourceCache::new());
        let hotkey_cache = Arc::new(SourceCache::new());
        let snippet_cache = Arc::new(SourceCache::new());

        let vocabulary_prefetch = Prefetcher::new(
            Arc::clone(&vocabulary_cache),
            config.retry_delay,
            handle.clone(),
            "phrases",
        );
        let hotkey_prefetch = Prefetcher::new(
            Arc::clone(&hotkey_cache),
            config.retry_delay,
            handle.clone(),
            "hotkeys",
        );
        let snippet_prefetch = Prefetcher::new(
            Arc::clone(&snippet_cache),
            config.retry_delay,
            handle,
            "snippets",
        );

        Arc::new(Self {
            config,
            accounts,
            phrases,
            hotkeys,
            snippets,
            vocabulary_cache,
            hotkey_cache,
            snippet_cache,
            vocabulary_prefetch,
            hotkey_prefetch,
            snippet_prefetch,
        })
    }

    /// Convenience constructor using the ambient tokio runtime.
    pub fn with_current_runtime(
        accounts: Arc<dyn AccountContext>,
        phrases: Arc<dyn PhraseSource>,
        hotkeys: Arc<dyn HotkeySource>,
        snippets: Arc<dyn SnippetSource>,
        config: EngineConfig,
    ) -> Arc<Self> {
        Self::new(accounts, phrases, hotkeys, snippets, config, Handle::current())
    }

    /// Constructs a completion provider strategy bound to this engine.
    pub fn provider(self: &Arc<Self>, kind: ProviderKind) -> Box<dyn CompletionProvider> {
        Box::new(EngineProvider::new(Arc::clone(self), kind))
    }

    /// Warm-up entry point: kicks off the initial background fetch of all
    /// three sources for the active account. Invoked once at editor
    /// initialization; returns immediately.
    pub fn preload(&self) {
        let account = self.accounts.current_account();
        if !is_valid_account(account) {
            debug!(account, "preload skipped; no tenant selected");
            return;
        }
        self.refresh_vocabulary(account);
        self.refresh_hotkeys(account);
        self.refresh_snippets(account);
    }

    /// True iff `text` contains at least one word not recognized against the
    /// active account's current vocabulary snapshot. With no snapshot, every
    /// word is unresolved — a visible but non-fatal signal.
    pub fn has_unresolved_phrases(&self, text: &str) -> bool {
        !self.unresolved_words(text).is_empty()
    }

    /// Distinct, alphabetically sorted unresolved words in `text`, judged
    /// against the active account's current vocabulary snapshot.
    pub fn unresolved_words(&self, text: &str) -> Vec<String> {
        let account = self.accounts.current_account();
        let snapshot = if is_valid_account(account) {
            self.vocabulary_cache.get(account)
        } else {
            None
        };
        match snapshot {
            Some(snapshot) => unresolved::unresolved_words(text, snapshot.items.lookup()),
            None => unresolved::unresolved_words(text, &PhraseSet::default()),
        }
    }

    /// Every hotkey entry for the active account, including inactive ones.
    /// Pass-through to the upstream source, for settings surfaces.
    pub async fn hotkey_meta(&self) -> Result<Vec<HotkeyEntry>, SourceError> {
        let account = self.accounts.current_account();
        if !is_valid_account(account) {
            return Ok(Vec::new());
        }
        self.hotkeys.hotkey_meta(account).await
    }

    /// Cache and refresh introspection used by tests and diagnostics.
    pub fn vocabulary_cache(&self) -> &SourceCache<VocabularySnapshot> {
        &self.vocabulary_cache
    }

    pub fn vocabulary_prefetcher(&self) -> &Prefetcher<VocabularySnapshot> {
        &self.vocabulary_prefetch
    }

    pub(crate) fn aggregate(
        &self,
        state: &EditorState,
        policy: BoundaryPolicy,
        sources: SourceSet,
    ) -> Completions {
        let (prefix, _) = prefix_before_cursor(&state.line, state.cursor, policy);
        if prefix.is_empty() {
            return Completions::empty();
        }
        let account = self.accounts.current_account();
        if !is_valid_account(account) {
            return Completions::empty();
        }

        let mut stages: Vec<Stage> = Vec::new();
        if sources.tokens {
            stages.push(self.token_stage(account, &prefix));
        }
        if sources.hotkeys {
            stages.push(self.hotkey_stage(account, &prefix));
        }
        if sources.snippets {
            stages.push(self.snippet_stage(account, &prefix));
        }
        Completions::from_stages(stages)
    }

    /// Vocabulary contribution. A missing, stale, or empty snapshot triggers
    /// a fire-and-forget refresh; whatever is cached right now is still
    /// served for this call.
    fn token_stage(&self, account: AccountId, prefix: &str) -> Stage {
        let snapshot = self.vocabulary_cache.get(account);
        let needs_refresh = match &snapshot {
            Some(snapshot) => {
                snapshot.age() > self.config.vocabulary_ttl || snapshot.items.is_empty()
            }
            None => true,
        };
        if needs_refresh {
            self.refresh_vocabulary(account);
        }

        let prefix = prefix.to_string();
        Box::new(move || match snapshot {
            Some(snapshot) if !snapshot.items.is_empty() => {
                filter_tokens(snapshot.items.phrases(), &prefix)
            }
            // Absent or not-yet-ready: nothing this call, refresh underway.
            _ => Vec::new(),
        })
    }

    /// Hotkey contribution. Waits up to the configured bound for an
    /// in-flight fetch; a timeout means no contribution this call.
    fn hotkey_stage(&self, account: AccountId, prefix: &str) -> Stage {
        if self.hotkey_cache.needs_refresh(account, self.config.vocabulary_ttl) {
            self.refresh_hotkeys(account);
        }
        let cache = Arc::clone(&self.hotkey_cache);
        let wait = self.config.source_wait;
        let prefix = prefix.to_string();
        Box::new(move || match cache.wait_ready(account, wait) {
            Some(snapshot) => filter_hotkeys(&snapshot.items, &prefix),
            None => Vec::new(),
        })
    }

    /// Snippet contribution, same bounded-wait policy as hotkeys.
    fn snippet_stage(&self, account: AccountId, prefix: &str) -> Stage {
        if self.snippet_cache.needs_refresh(account, self.config.vocabulary_ttl) {
            self.refresh_snippets(account);
        }
        let cache = Arc::clone(&self.snippet_cache);
        let wait = self.config.source_wait;
        let prefix = prefix.to_string();
        Box::new(move || match cache.wait_ready(account, wait) {
            Some(snapshot) => filter_snippets(&snapshot.items, &prefix),
            None => Vec::new(),
        })
    }

    fn refresh_vocabulary(&self, account: AccountId) {
        let source = Arc::clone(&self.phrases);
        self.vocabulary_prefetch.trigger(account, move |account| {
            let source = Arc::clone(&source);
            async move {
                let phrases = source.vocabulary(account).await?;
                Ok(VocabularySnapshot::new(phrases))
            }
        });
    }

    fn refresh_hotkeys(&self, account: AccountId) {
        let source = Arc::clone(&self.hotkeys);
        self.hotkey_prefetch.trigger(account, move |account| {
            let source = Arc::clone(&source);
            async move { source.active_hotkeys(account).await }
        });
    }

    fn refresh_snippets(&self, account: AccountId) {
        let source = Arc::clone(&self.snippets);
        self.snippet_prefetch.trigger(account, move |account| {
            let source = Arc::clone(&source);
            async move { source.active_snippets(account).await }
        });
    }
}
