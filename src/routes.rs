//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One origin serves both the compiled client bundle and the `/api` proxy, so
//! the browser never needs CORS and the session token only ever travels to
//! this host. Unknown paths fall back to `index.html`; the client router
//! resolves them and its guard decides access.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::proxy;
use crate::state::AppState;

/// Full application router: health, API proxy, SPA bundle.
pub fn app(state: AppState) -> Router {
    let dist = state.config.dist_dir.clone();
    let spa = ServeDir::new(&dist)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/{*path}", any(proxy::proxy))
        .with_state(state)
        .fallback_service(spa)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
