//! Time-bounded cache of resolved stream lists.
//!
//! Entries are keyed by [`LookupKey`] and live for a fixed TTL. Expired
//! entries are removed when a lookup finds them; nothing sweeps the map in
//! the background and there is no capacity bound.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::identifier::LookupKey;
use crate::metrics::CACHE_LOOKUPS;
use crate::stream::StreamRecord;

/// Default entry lifetime in seconds (two hours).
pub const DEFAULT_TTL_SECS: u64 = 2 * 60 * 60;

fn default_ttl() -> Duration {
    Duration::seconds(DEFAULT_TTL_SECS as i64)
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    streams: Vec<StreamRecord>,
    created_at: DateTime<Utc>,
}

/// Stream list cache shared by all in-flight requests.
pub struct StreamCache {
    entries: Mutex<HashMap<LookupKey, CacheEntry>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl std::fmt::Debug for StreamCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl Default for StreamCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), default_ttl())
    }
}

impl StreamCache {
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached streams for `key` if present and younger than the TTL.
    ///
    /// An expired entry is deleted and reported as a miss.
    pub async fn get(&self, key: &LookupKey) -> Option<Vec<StreamRecord>> {
        let mut entries = self.entries.lock().await;
        let now = self.clock.now();

        let Some(entry) = entries.get(key) else {
            CACHE_LOOKUPS.with_label_values(&["miss"]).inc();
            return None;
        };

        if now - entry.created_at < self.ttl {
            CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
            return Some(entry.streams.clone());
        }

        entries.remove(key);
        CACHE_LOOKUPS.with_label_values(&["expired"]).inc();
        debug!(key = %key, "Evicted expired cache entry");
        None
    }

    /// Store `streams` under `key`, replacing any previous entry.
    pub async fn put(&self, key: LookupKey, streams: Vec<StreamRecord>) {
        let created_at = self.clock.now();
        self.entries
            .lock()
            .await
            .insert(key, CacheEntry { streams, created_at });
    }

    /// Number of stored entries, expired ones included until looked up.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
