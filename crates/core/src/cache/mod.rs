//! In-memory cache for content API responses.
//!
//! Entries are keyed by the exact request URL (query string included) and
//! live for a fixed TTL. Expired entries are evicted lazily on lookup; there
//! is no background sweep. The cache lives for the lifetime of the process.
//!
//! Concurrent misses for the same URL are not deduplicated: each caller
//! fetches and writes, and the last write wins.

mod entry;

pub use entry::CacheEntry;

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default TTL for cached responses (1 hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Shared, cloneable handle to the response cache.
///
/// Uses a HashMap behind a tokio RwLock; clones share the same map.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl ResponseCache {
    /// Create an empty cache with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh payload for `url`.
    ///
    /// An entry older than the TTL is removed and reported as absent.
    pub async fn get(&self, url: &str) -> Option<Arc<Value>> {
        {
            let entries = self.entries.read().await;
            match entries.get(url) {
                None => return None,
                Some(entry) if !entry.is_expired(self.ttl) => {
                    tracing::debug!("cache hit for {}", url);
                    return Some(Arc::clone(&entry.payload));
                }
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(url).is_some_and(|entry| entry.is_expired(self.ttl)) {
            tracing::debug!("cache expired for {}", url);
            entries.remove(url);
            return None;
        }

        // Another task refreshed the entry between the two locks.
        entries.get(url).map(|entry| Arc::clone(&entry.payload))
    }

    /// Store a payload for `url`, stamped with the current time.
    ///
    /// Overwrites any previous entry for the same URL.
    pub async fn insert(&self, url: &str, payload: Arc<Value>) {
        let entry = CacheEntry { url: url.to_string(), payload, fetched_at: Instant::now() };
        self.entries.write().await.insert(url.to_string(), entry);
    }

    /// Timestamp of the stored entry, if any (fresh or not).
    pub async fn fetched_at(&self, url: &str) -> Option<Instant> {
        self.entries.read().await.get(url).map(|entry| entry.fetched_at)
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
