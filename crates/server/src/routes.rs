//! Router configuration.
//!
//! Static assets are served straight from the build directory and never
//! classified. Everything else reaches the dispatcher.

use crate::handler::dispatch;
use crate::state::AppState;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let static_dir = state.static_dir();

    Router::new()
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
