//! Cached response entry.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// A content API response held by [`super::ResponseCache`].
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Exact request URL; also the cache key.
    pub url: String,
    /// Opaque decoded response body.
    pub payload: Arc<Value>,
    /// When the fetch completed.
    pub fetched_at: Instant,
}

impl CacheEntry {
    /// Whether the entry is at least `ttl` old.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiry() {
        let entry = CacheEntry { url: "u".into(), payload: Arc::new(Value::Null), fetched_at: Instant::now() };
        assert!(!entry.is_expired(Duration::from_secs(60)));

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(entry.is_expired(Duration::from_secs(60)));
    }
}
