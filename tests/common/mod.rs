//! Shared mock sources for integration tests.
#![allow(dead_code)] // not every test binary uses every mock

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use report_completion_engine::models::{AccountId, HotkeyEntry, SnippetEntry};
use report_completion_engine::sources::{
    AccountContext, HotkeySource, PhraseSource, SnippetSource, SourceError,
};

/// Account context whose id can be switched mid-test.
pub struct SwitchableAccount {
    id: AtomicI64,
}

impl SwitchableAccount {
    pub fn new(id: AccountId) -> Arc<Self> {
        Arc::new(Self {
            id: AtomicI64::new(id),
        })
    }

    #[allow(dead_code)]
    pub fn switch(&self, id: AccountId) {
        self.id.store(id, Ordering::SeqCst);
    }
}

impl AccountContext for SwitchableAccount {
    fn current_account(&self) -> AccountId {
        self.id.load(Ordering::SeqCst)
    }
}

/// Phrase source with a call counter, optional artificial delay, and a
/// swappable result list.
pub struct MockPhrases {
    pub calls: AtomicUsize,
    phrases: Mutex<Vec<String>>,
    delay: Duration,
}

impl MockPhrases {
    pub fn new(phrases: &[&str]) -> Arc<Self> {
        Self::with_delay(phrases, Duration::ZERO)
    }

    pub fn with_delay(phrases: &[&str], delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            phrases: Mutex::new(phrases.iter().map(|s| s.to_string()).collect()),
            delay,
        })
    }

    #[allow(dead_code)]
    pub fn set_phrases(&self, phrases: &[&str]) {
        *self.phrases.lock() = phrases.iter().map(|s| s.to_string()).collect();
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhraseSource for MockPhrases {
    async fn vocabulary(&self, _account: AccountId) -> Result<Vec<String>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.phrases.lock().clone())
    }
}

/// Hotkey source with an optional artificial delay.
pub struct MockHotkeys {
    pub calls: AtomicUsize,
    entries: Vec<HotkeyEntry>,
    delay: Duration,
}

impl MockHotkeys {
    pub fn new(entries: Vec<HotkeyEntry>) -> Arc<Self> {
        Self::with_delay(entries, Duration::ZERO)
    }

    pub fn with_delay(entries: Vec<HotkeyEntry>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            entries,
            delay,
        })
    }
}

#[async_trait]
impl HotkeySource for MockHotkeys {
    async fn active_hotkeys(&self, _account: AccountId) -> Result<Vec<HotkeyEntry>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.active)
            .cloned()
            .collect())
    }

    async fn hotkey_meta(&self, _account: AccountId) -> Result<Vec<HotkeyEntry>, SourceError> {
        Ok(self.entries.clone())
    }
}

/// Snippet source returning a fixed list.
pub struct MockSnippets {
    entries: Vec<SnippetEntry>,
}

impl MockSnippets {
    pub fn new(entries: Vec<SnippetEntry>) -> Arc<Self> {
        Arc::new(Self { entries })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl SnippetSource for MockSnippets {
    async fn active_snippets(&self, _account: AccountId) -> Result<Vec<SnippetEntry>, SourceError> {
        Ok(self.entries.clone())
    }
}
