//! Content API access.
//!
//! ### Endpoints
//! - Destinations by name substring, packages by exact id, single package,
//!   single group tour, single theme. See [`Endpoint`].
//!
//! ### Caching
//! - [`CachedFetcher`] memoizes successful responses by exact URL for a fixed
//!   TTL. Failures are never cached.
//!
//! ### Normalization
//! - Raw envelopes are loosely typed. [`ContentRecord::from_payload`] turns
//!   them into a record with a guaranteed name, or nothing.

pub mod cached;
pub mod endpoint;
pub mod error;
pub mod response;

pub use cached::CachedFetcher;
pub use endpoint::Endpoint;
pub use error::ContentError;
pub use response::ContentRecord;

use async_trait::async_trait;
use reqwest::{Client, header};
use seoshell_core::{AppConfig, Error};
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

/// Source of raw content API payloads.
///
/// Implemented over HTTP in production and by in-memory fakes in tests.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// GET `url` and decode the body as JSON.
    async fn get_json(&self, url: &Url) -> Result<Value, ContentError>;
}

/// Configuration for the HTTP content source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// User agent string (default: "seoshell/0.1")
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { user_agent: "seoshell/0.1".to_string(), timeout: Duration::from_millis(20000) }
    }
}

impl From<&AppConfig> for SourceConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), timeout: config.timeout() }
    }
}

/// reqwest-backed content source.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    http: Client,
}

impl HttpContentSource {
    /// Create a new HTTP source with the given configuration.
    pub fn new(config: SourceConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpClient(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn get_json(&self, url: &Url) -> Result<Value, ContentError> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::HttpError { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&bytes).map_err(|e| ContentError::Parse(e.to_string()))?;

        tracing::debug!("fetched {} in {:?} ({} bytes)", url, start.elapsed(), bytes.len());

        Ok(payload)
    }
}
