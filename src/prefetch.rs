//! Single-flight background refresh for the source caches.
//!
//! One [`Prefetcher`] instance guards one cache: however many completion
//! calls observe a stale or missing snapshot at once, at most one fetch is
//! in flight. The guard is an atomic compare-exchange, and a scope guard
//! clears it on every exit path, so a failed or panicking fetch can never
//! permanently disable refresh for an account.
//!
//! Refreshes are fire-and-forget on the tokio worker pool. A fetch that
//! returns zero items is retried once after a short delay; an empty result
//! after the retry is accepted as the new snapshot. Fetch errors leave the
//! previous snapshot (stale-but-present, or absent) untouched.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, trace, warn};

use crate::cache::SourceCache;
use crate::models::{AccountId, VocabularySnapshot, is_valid_account};
use crate::sources::SourceError;

/// Snapshot payload that can report emptiness, driving the retry-on-empty
/// policy.
pub trait RefreshPayload: Send + Sync + 'static {
    fn is_empty(&self) -> bool;
}

impl RefreshPayload for VocabularySnapshot {
    fn is_empty(&self) -> bool {
        VocabularySnapshot::is_empty(self)
    }
}

impl<T: Send + Sync + 'static> RefreshPayload for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// Single-flight refresher for one source cache.
pub struct Prefetcher<T: RefreshPayload> {
    cache: Arc<SourceCache<T>>,
    refreshing: AtomicBool,
    fetches_started: AtomicU64,
    retry_delay: Duration,
    handle: Handle,
    source_name: &'static str,
}

impl<T: RefreshPayload> Prefetcher<T> {
    pub fn new(
        cache: Arc<SourceCache<T>>,
        retry_delay: Duration,
        handle: Handle,
        source_name: &'static str,
    ) -> Arc<Self> {
        Arc::new(Self {
            cache,
            refreshing: AtomicBool::new(false),
            fetches_started: AtomicU64::new(0),
            retry_delay,
            handle,
            source_name,
        })
    }

    /// True while a refresh task is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// Number of refresh tasks ever started, for tests and introspection.
    pub fn fetches_started(&self) -> u64 {
        self.fetches_started.load(Ordering::Acquire)
    }

    /// Kicks off a background refresh for `account` unless one is already
    /// in flight. Returns immediately in every case.
    ///
    /// `fetch` is invoked on the worker pool; it may be called twice when
    /// the first result is empty.
    pub fn trigger<F, Fut>(self: &Arc<Self>, account: AccountId, fetch: F)
    where
        F: Fn(AccountId) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, SourceError>> + Send + 'static,
    {
        if !is_valid_account(account) {
            return;
        }
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            trace!(source = self.source_name, account, "refresh already in flight");
            return;
        }
        self.fetches_started.fetch_add(1, Ordering::AcqRel);

        let this = Arc::clone(self);
        self.handle.spawn(async move {
            // Clears the guard even if the fetch errors, panics, or the
            // task is dropped at runtime shutdown.
            let _clear = scopeguard::guard(Arc::clone(&this), |p| {
                p.refreshing.store(false, Ordering::Release);
            });

            match this.fetch_with_retry(account, &fetch).await {
                Ok(items) => {
                    debug!(source = this.source_name, account, "snapshot refreshed");
                    this.cache.set(account, items);
                }
                Err(error) => {
                    warn!(
                        source = this.source_name,
                        account,
                        %error,
                        "refresh failed; keeping previous snapshot"
                    );
                }
            }
        });
    }

    async fn fetch_with_retry<F, Fut>(&self, account: AccountId, fetch: &F) -> Result<T, SourceError>
    where
        F: Fn(AccountId) -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, SourceError>> + Send,
    {
        let first = fetch(account).await?;
        if !first.is_empty() {
            return Ok(first);
        }

        debug!(
            source = self.source_name,
            account, "fetch returned zero items; retrying once"
        );
        tokio::time::sleep(self.retry_delay).await;
        // A second empty result is accepted as the snapshot.
        fetch(account).await
    }
}
