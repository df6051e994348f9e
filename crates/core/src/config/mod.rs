//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SEOSHELL_*)
//! 2. The bare `PORT` variable set by most hosting platforms
//! 3. TOML config file (if SEOSHELL_CONFIG_FILE set)
//! 4. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SEOSHELL_*)
/// 2. `PORT`
/// 3. TOML config file (if SEOSHELL_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Interface to bind.
    ///
    /// Set via SEOSHELL_HOST environment variable.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    ///
    /// Set via SEOSHELL_PORT or PORT environment variables.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the content API. Relative media URLs are resolved against it.
    ///
    /// Set via SEOSHELL_CONTENT_API_BASE environment variable.
    #[serde(default = "default_content_api_base")]
    pub content_api_base: String,

    /// Directory holding the compiled application (`index.html` and `static/`).
    ///
    /// Set via SEOSHELL_BUILD_DIR environment variable.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Site name appended to titles and used in fallback copy.
    ///
    /// Set via SEOSHELL_SITE_NAME environment variable.
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Site-wide description, used by pages without one of their own (the home page).
    ///
    /// Set via SEOSHELL_DEFAULT_DESCRIPTION environment variable.
    #[serde(default = "default_description")]
    pub default_description: String,

    /// Share image used when a page has none of its own.
    ///
    /// Set via SEOSHELL_DEFAULT_IMAGE environment variable. An empty value
    /// disables image tags for such pages.
    #[serde(default = "default_image")]
    pub default_image: Option<String>,

    /// Href of the compiled stylesheet referenced by synthesized documents.
    #[serde(default = "default_stylesheet_href")]
    pub stylesheet_href: String,

    /// Src of the compiled entry script referenced by synthesized documents.
    #[serde(default = "default_script_src")]
    pub script_src: String,

    /// Lifetime of cached content API responses, in seconds.
    ///
    /// Set via SEOSHELL_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_hour")]
    pub cache_ttl_secs: u64,

    /// Name of the cookie that marks a client as "serve the application".
    ///
    /// Set via SEOSHELL_MARKER_COOKIE environment variable.
    #[serde(default = "default_marker_cookie")]
    pub marker_cookie: String,

    /// Lifetime of the marker cookie, in seconds.
    ///
    /// Set via SEOSHELL_MARKER_MAX_AGE_SECS environment variable.
    #[serde(default = "default_hour")]
    pub marker_max_age_secs: u64,

    /// Content API request timeout in milliseconds.
    ///
    /// Set via SEOSHELL_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string sent to the content API.
    ///
    /// Set via SEOSHELL_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

fn default_content_api_base() -> String {
    "https://admin.aventuras.co.in".into()
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_site_name() -> String {
    "Aventuras Holidays".into()
}

fn default_description() -> String {
    "Discover amazing travel experiences with Aventuras Holidays. Book your dream vacation today!".into()
}

fn default_image() -> Option<String> {
    Some("https://admin.aventuras.co.in/uploads/image_1_1_2a69dfc02b.png".into())
}

fn default_stylesheet_href() -> String {
    "/static/css/main.css".into()
}

fn default_script_src() -> String {
    "/static/js/main.js".into()
}

fn default_hour() -> u64 {
    3600
}

fn default_marker_cookie() -> String {
    "render_mode".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_user_agent() -> String {
    "seoshell/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            content_api_base: default_content_api_base(),
            build_dir: default_build_dir(),
            site_name: default_site_name(),
            default_description: default_description(),
            default_image: default_image(),
            stylesheet_href: default_stylesheet_href(),
            script_src: default_script_src(),
            cache_ttl_secs: default_hour(),
            marker_cookie: default_marker_cookie(),
            marker_max_age_secs: default_hour(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Response cache TTL.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Marker cookie lifetime.
    pub fn marker_max_age(&self) -> Duration {
        Duration::from_secs(self.marker_max_age_secs)
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default share image, with an empty string treated as unset.
    pub fn default_image(&self) -> Option<&str> {
        self.default_image.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Parsed content API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the base is not an absolute http(s) URL.
    pub fn content_api_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.content_api_base.trim()).map_err(|e| ConfigError::Invalid {
            field: "content_api_base".into(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ConfigError::Invalid {
                field: "content_api_base".into(),
                reason: format!("unsupported scheme: {scheme}"),
            }),
        }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SEOSHELL_`
    /// 2. `PORT`
    /// 3. TOML file from `SEOSHELL_CONFIG_FILE` (if set)
    /// 4. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SEOSHELL_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::raw().only(&["PORT"])).merge(
            Env::prefixed("SEOSHELL_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
