//! Caching fetch layer over a [`ContentSource`].

use super::{ContentError, ContentSource};
use seoshell_core::ResponseCache;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Memoizes successful content API responses by exact URL.
///
/// A hit returns the stored payload without touching the network. A miss or
/// expired entry performs the fetch and stores the result stamped at
/// completion. Errors pass through and leave the cache untouched.
#[derive(Clone)]
pub struct CachedFetcher {
    source: Arc<dyn ContentSource>,
    cache: ResponseCache,
}

impl CachedFetcher {
    /// Wrap a source with the given cache.
    pub fn new(source: Arc<dyn ContentSource>, cache: ResponseCache) -> Self {
        Self { source, cache }
    }

    /// The underlying cache handle.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Fetch `url`, serving from cache when fresh.
    pub async fn get(&self, url: &Url) -> Result<Arc<Value>, ContentError> {
        let key = url.as_str();

        if let Some(payload) = self.cache.get(key).await {
            return Ok(payload);
        }

        tracing::debug!("fetching {}", key);
        let payload = Arc::new(self.source.get_json(url).await?);
        self.cache.insert(key, Arc::clone(&payload)).await;

        Ok(payload)
    }
}
