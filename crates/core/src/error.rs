//! Unified error types for seoshell.
//!
//! Content API failures never reach this type: they are absorbed into
//! placeholder metadata. What remains are bootstrap failures.

use crate::config::ConfigError;

/// Unified error types for the seoshell server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The outbound HTTP client could not be constructed.
    #[error("HTTP_CLIENT: {0}")]
    HttpClient(String),

    /// Configuration failed to load or validate.
    #[error("CONFIG: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Stable code prefix, useful for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Error::HttpClient(_) => "HTTP_CLIENT",
            Error::Config(_) => "CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HttpClient("no TLS backend".to_string());
        assert_eq!(err.code(), "HTTP_CLIENT");
        assert_eq!(err.to_string(), "HTTP_CLIENT: no TLS backend");
    }

    #[test]
    fn test_error_from_config() {
        let err: Error = ConfigError::Invalid { field: "port".into(), reason: "bad".into() }.into();
        assert_eq!(err.code(), "CONFIG");
        assert!(err.to_string().contains("port"));
    }
}
