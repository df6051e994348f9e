//! Compiled application assets.
//!
//! The entry document is served for every page the application handles on
//! the client, so any path that is not synthesized gets `index.html`.

use crate::error::ServeError;
use crate::state::AppState;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Header marking responses that carry the interactive application.
pub const RENDERED_APP: HeaderName = HeaderName::from_static("x-rendered-app");

/// Serve the application entry document.
pub async fn serve_index(state: &AppState, request: Request) -> Result<Response, ServeError> {
    let index = state.index_path();

    if !tokio::fs::try_exists(&index).await.unwrap_or(false) {
        return Err(ServeError::AssetsMissing(index.display().to_string()));
    }

    let response = ServeFile::new(&index).oneshot(request).await.unwrap_or_else(|never| match never {});
    let mut response = response.map(Body::new);
    response.headers_mut().insert(RENDERED_APP, HeaderValue::from_static("spa-client"));

    Ok(response)
}
