//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

/// RFC 6265 token characters allowed in a cookie name.
fn is_cookie_token(name: &str) -> bool {
    name.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `site_name` or `user_agent` is empty
    /// - `content_api_base` is not an absolute http(s) URL
    /// - `cache_ttl_secs` or `marker_max_age_secs` is 0
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `marker_cookie` is not a valid cookie name
    ///
    /// Returns `ConfigError::Missing` if `build_dir` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "site_name".into(), reason: "must not be empty".into() });
        }

        self.content_api_url()?;

        if self.build_dir.as_os_str().is_empty() {
            return Err(ConfigError::Missing {
                field: "build_dir".into(),
                hint: "Set SEOSHELL_BUILD_DIR to the compiled application directory".into(),
            });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.marker_cookie.is_empty() || !is_cookie_token(&self.marker_cookie) {
            return Err(ConfigError::Invalid {
                field: "marker_cookie".into(),
                reason: "must be a non-empty cookie token".into(),
            });
        }
        if self.marker_max_age_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "marker_max_age_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.default_image().is_none() {
            tracing::warn!("no default_image configured; pages without their own image get no share image");
        }

        Ok(())
    }
}
