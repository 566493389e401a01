//! `/api/*` reverse proxy to the remote service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser app calls same-origin `/api/...`; this handler relays each
//! call to `API_ORIGIN`. Authentication is not interpreted here: the
//! `Authorization` header passes through untouched and upstream statuses
//! (including 401) come back unchanged for the client to act on.
//!
//! ERROR HANDLING
//! ==============
//! Only failures to reach the upstream are answered locally, as 502 with a
//! `{"detail": ...}` body shaped like the service's own errors.

use axum::body::{Body, Bytes};
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

/// Request headers relayed upstream. Everything else (host, connection,
/// hop-by-hop, content-length) is rebuilt by `reqwest`.
pub const FORWARDED_REQUEST_HEADERS: &[header::HeaderName] =
    &[header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT, header::COOKIE];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("upstream timed out")]
    Timeout,
    #[error("upstream body read failed: {0}")]
    Body(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout } else { Self::Unreachable(err) }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "api proxy failed");
        let detail = match self {
            Self::Timeout => "Upstream service timed out.",
            Self::Unreachable(_) | Self::Body(_) => "Upstream service unavailable.",
        };
        (StatusCode::BAD_GATEWAY, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

/// Prefix the router mounts the proxy under.
pub const API_PREFIX: &str = "/api/";

/// `{origin}/api/{path}` plus the raw query, if any. `path` is used as
/// received, percent-escapes included.
pub fn upstream_url(origin: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!("{}/api/{}", origin.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(q);
    }
    url
}

/// Keep only the headers listed in [`FORWARDED_REQUEST_HEADERS`].
pub fn forwarded_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in FORWARDED_REQUEST_HEADERS {
        for value in incoming.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// `ANY /api/{*path}`: relay to the upstream and mirror its reply.
///
/// The path is read from the raw request URI rather than the decoded route
/// capture, so `%2F` and `%3F` reach the upstream still escaped.
pub async fn proxy(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let path = uri.path().strip_prefix(API_PREFIX).unwrap_or_default();
    let url = upstream_url(&state.config.api_origin, path, uri.query());
    tracing::debug!(%method, %url, "proxying api request");

    let upstream = state
        .http
        .request(method, &url)
        .headers(forwarded_headers(&headers))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream.bytes().await.map_err(ProxyError::Body)?;
    if status == StatusCode::UNAUTHORIZED {
        tracing::info!(%url, "upstream rejected credential");
    }

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    if let Some(value) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
