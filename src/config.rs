//! Engine tuning knobs.
//!
//! Defaults mirror the behavior the editor integration was built against:
//! a 2-minute vocabulary TTL, a 750 ms retry delay when an upstream source
//! answers with zero items, and a 50 ms cap on waiting for an in-flight
//! hotkey/snippet fetch from the synchronous completion path.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables shared by the caches, prefetchers and completion providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum snapshot age before a vocabulary read triggers a background
    /// refresh. The stale snapshot is still served in the meantime.
    pub vocabulary_ttl: Duration,

    /// Delay before the single retry when an upstream fetch returns zero
    /// items. An empty result after the retry is accepted as the snapshot.
    pub retry_delay: Duration,

    /// Upper bound on how long the completion path waits for an in-flight
    /// asynchronous source (hotkeys, snippets). On timeout the source
    /// contributes nothing to that call.
    pub source_wait: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vocabulary_ttl: Duration::from_secs(120),
            retry_delay: Duration::from_millis(750),
            source_wait: Duration::from_millis(50),
        }
    }
}
