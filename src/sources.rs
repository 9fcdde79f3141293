//! Interfaces to the external data sources feeding completion.
//!
//! The phrase vocabulary, hotkeys and snippets live behind database/network
//! services owned by other parts of the application; this crate only sees
//! them through the async traits below. Fetch failures surface as
//! [`SourceError`] and are absorbed at the refresh-task boundary — nothing
//! here ever propagates into the editor's completion call path.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AccountId, HotkeyEntry, SnippetEntry};

/// Upstream fetch failure from one of the three sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("upstream query failed: {0}")]
    Upstream(String),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Provides the phrase vocabulary for an account. May be slow.
#[async_trait]
pub trait PhraseSource: Send + Sync {
    async fn vocabulary(&self, account: AccountId) -> Result<Vec<String>, SourceError>;
}

/// Provides user-defined hotkeys for an account.
#[async_trait]
pub trait HotkeySource: Send + Sync {
    /// Entries eligible for completion (active only).
    async fn active_hotkeys(&self, account: AccountId) -> Result<Vec<HotkeyEntry>, SourceError>;

    /// Every entry including inactive ones, for settings surfaces.
    async fn hotkey_meta(&self, account: AccountId) -> Result<Vec<HotkeyEntry>, SourceError>;
}

/// Provides reusable snippets for an account.
#[async_trait]
pub trait SnippetSource: Send + Sync {
    async fn active_snippets(&self, account: AccountId) -> Result<Vec<SnippetEntry>, SourceError>;
}

/// Synchronous access to the active tenant.
pub trait AccountContext: Send + Sync {
    fn current_account(&self) -> AccountId;
}

impl AccountContext for AccountId {
    fn current_account(&self) -> AccountId {
        *self
    }
}
