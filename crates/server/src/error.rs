//! Structured errors for the seoshell server.
//!
//! Every variant renders as a plain-text HTTP response.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Body of the response when the application build is missing.
pub const ASSETS_MISSING_BODY: &str = "Application build not found. Please ensure the build folder exists.";

/// Errors surfaced by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// The compiled application entry document is not on disk.
    #[error("ASSETS_MISSING: {0}")]
    AssetsMissing(String),

    /// Only GET and HEAD are served.
    #[error("METHOD_NOT_ALLOWED: {0}")]
    MethodNotAllowed(String),
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        match &self {
            ServeError::AssetsMissing(path) => {
                tracing::error!("application build missing at {}", path);
                (StatusCode::NOT_FOUND, ASSETS_MISSING_BODY).into_response()
            }
            ServeError::MethodNotAllowed(method) => {
                tracing::debug!("rejected {} request", method);
                let mut response = (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
                response.headers_mut().insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
                response
            }
        }
    }
}
