//! Shared application state.

use seoshell_client::{CachedFetcher, ContentSource, HttpContentSource, MetadataProvider, ShellOptions, SiteProfile};
use seoshell_core::{AppConfig, Error, ResponseCache};
use std::path::PathBuf;
use std::sync::Arc;

/// State handed to every handler.
///
/// Cloning is cheap; the response cache inside the provider is shared by all
/// clones for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub provider: Arc<MetadataProvider>,
    pub shell: Arc<ShellOptions>,
}

impl AppState {
    /// Build state over an arbitrary content source.
    pub fn new(config: AppConfig, source: Arc<dyn ContentSource>) -> Result<Self, Error> {
        let site = SiteProfile::from_config(&config)?;
        let fetcher = CachedFetcher::new(source, ResponseCache::new(config.cache_ttl()));
        let shell = ShellOptions::from(&config);

        Ok(Self {
            provider: Arc::new(MetadataProvider::new(fetcher, site)),
            shell: Arc::new(shell),
            config: Arc::new(config),
        })
    }

    /// Build state backed by the HTTP content API.
    pub fn from_config(config: AppConfig) -> Result<Self, Error> {
        let source = HttpContentSource::new((&config).into())?;
        Self::new(config, Arc::new(source))
    }

    /// Compiled application entry document.
    pub fn index_path(&self) -> PathBuf {
        self.config.build_dir.join("index.html")
    }

    /// Directory of compiled static assets.
    pub fn static_dir(&self) -> PathBuf {
        self.config.build_dir.join("static")
    }
}
