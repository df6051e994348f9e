//! Content API client error types.

use std::sync::Arc;

/// Errors from the content API client.
///
/// None of these reach a visitor: the metadata provider converts every
/// failure into placeholder metadata for the route kind.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContentError {
    /// Endpoint URL could not be built from the base.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Non-2xx response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body was not JSON.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ContentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ContentError::Timeout } else { ContentError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContentError::HttpError { status: 404 };
        assert!(err.to_string().contains("404"));

        let err = ContentError::Parse("expected value".to_string());
        assert!(err.to_string().contains("parse error"));
    }
}
