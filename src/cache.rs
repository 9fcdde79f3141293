//! Per-account snapshot cache for the completion sources.
//!
//! Each source (phrases, hotkeys, snippets) gets its own [`SourceCache`].
//! Snapshots are published wholesale behind an `Arc`, so readers observe
//! either the previous snapshot or the new one, never a mix. `get` never
//! blocks and never performs I/O; the bounded [`SourceCache::wait_ready`]
//! is the one place the completion path may pause, capped by the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::{Condvar, Mutex};

use crate::models::{AccountId, Snapshot, is_valid_account};

/// Thread-safe per-account store of the latest snapshot from one source.
#[derive(Debug)]
pub struct SourceCache<T> {
    entries: DashMap<AccountId, Arc<Snapshot<T>>>,
    generation: AtomicU64,
    ready_lock: Mutex<()>,
    ready_cv: Condvar,
}

impl<T> SourceCache<T> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            generation: AtomicU64::new(0),
            ready_lock: Mutex::new(()),
            ready_cv: Condvar::new(),
        }
    }

    /// True iff a snapshot exists for this account, possibly stale.
    pub fn has(&self, account: AccountId) -> bool {
        self.entries.contains_key(&account)
    }

    /// Returns the current snapshot, if any. Never blocks, never fetches.
    pub fn get(&self, account: AccountId) -> Option<Arc<Snapshot<T>>> {
        self.entries.get(&account).map(|entry| Arc::clone(entry.value()))
    }

    /// Atomically replaces the snapshot for `account` and wakes any bounded
    /// waiters. Invalid accounts are ignored.
    pub fn set(&self, account: AccountId, items: T) {
        if !is_valid_account(account) {
            return;
        }
        self.entries.insert(account, Arc::new(Snapshot::new(items)));
        self.generation.fetch_add(1, Ordering::AcqRel);

        let _guard = self.ready_lock.lock();
        self.ready_cv.notify_all();
    }

    /// True when the account has no snapshot or its snapshot is older than
    /// `ttl`. Callers use this to decide on a background refresh; the stale
    /// snapshot itself remains readable throughout.
    pub fn needs_refresh(&self, account: AccountId, ttl: Duration) -> bool {
        match self.get(account) {
            Some(snapshot) => snapshot.age() > ttl,
            None => true,
        }
    }

    /// Waits up to `timeout` for a snapshot to appear for `account`.
    ///
    /// Returns immediately when one is already present. On timeout the
    /// in-flight fetch (if any) keeps running for next time and `None` is
    /// returned unless a snapshot landed at the last moment.
    pub fn wait_ready(&self, account: AccountId, timeout: Duration) -> Option<Arc<Snapshot<T>>> {
        if let Some(snapshot) = self.get(account) {
            return Some(snapshot);
        }

        let deadline = Instant::now() + timeout;
        let mut guard = self.ready_lock.lock();
        loop {
            if let Some(snapshot) = self.get(account) {
                return Some(snapshot);
            }
            if Instant::now() >= deadline
                || self.ready_cv.wait_until(&mut guard, deadline).timed_out()
            {
                return self.get(account);
            }
        }
    }

    /// Number of accounts with a cached snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of snapshot publications since construction.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Drops every cached snapshot. Safe at any time; snapshots are pure
    /// caches rebuilt on demand.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl<T> Default for SourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
