//! HTTP client wrapper with credential injection and auth-failure handling.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every REST call in the app goes through [`HttpClient::send`]. The client
//! attaches `Authorization: Token <token>` when a session exists, and on a
//! 401 to a credentialed request invalidates the session and forces a full
//! page load of `/login`.
//!
//! ORDERING
//! ========
//! `send` runs injection, then the transport (the only suspension point),
//! then interception, then returns to the caller. A caller never observes a
//! response before interception has run for it.
//!
//! ERROR HANDLING
//! ==============
//! `send` passes every non-401 response through untouched, whatever its
//! status. The typed helpers (`get_json` and friends) turn non-2xx into
//! [`ApiError::Status`] for callers that only want data.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::routes::LOGIN_PATH;
use crate::state::session::SessionStore;
use crate::util::navigation::NavigationForcer;

/// Base URL for the remote service. The host server proxies it.
pub const DEFAULT_BASE_URL: &str = "/api/";

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";

const UNAUTHORIZED: u16 = 401;

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// An outbound request, relative to the client's base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), headers: Vec::new(), body: None }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Serialize `body` as the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(raw);
        Ok(self)
    }

    /// Set `name`, replacing any existing value (names compare case-insensitively).
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received response: status code and raw body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] on malformed or mismatched JSON.
    pub fn json<R: DeserializeOwned>(&self) -> Result<R, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// The request never produced a response (network down, CORS, aborted).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure, propagated untouched.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The server rejected the session credential. The session has already
    /// been invalidated by the time the caller sees this.
    #[error("session rejected: status {status}")]
    Unauthorized { status: u16, body: String },

    /// Any other non-success status (typed helpers only).
    #[error("request failed: status {status}")]
    Status { status: u16, body: String },

    #[error("response decode failed: {0}")]
    Decode(String),

    #[error("request encode failed: {0}")]
    Encode(String),
}

impl ApiError {
    /// Server-provided `detail` message, if the body carries one.
    pub fn detail(&self) -> Option<String> {
        let body = match self {
            Self::Unauthorized { body, .. } | Self::Status { body, .. } => body,
            _ => return None,
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("detail")?.as_str().map(str::to_owned)
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends a fully prepared request to an absolute or origin-relative URL.
pub trait Transport {
    fn send(&self, url: String, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>>;
}

/// Browser fetch via `gloo-net`, with cookies included.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "csr")]
impl Transport for GlooTransport {
    fn send(&self, url: String, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        Box::pin(async move {
            use gloo_net::http::{Method as GlooMethod, RequestBuilder};

            let method = match request.method {
                Method::Get => GlooMethod::GET,
                Method::Post => GlooMethod::POST,
                Method::Put => GlooMethod::PUT,
                Method::Delete => GlooMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&url)
                .method(method)
                .credentials(web_sys::RequestCredentials::Include);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let built = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError(e.to_string()))?;

            let resp = built.send().await.map_err(|e| TransportError(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| TransportError(e.to_string()))?;
            Ok(ApiResponse { status, body })
        })
    }
}

/// Transport for native builds, where there is no fetch API.
#[cfg(not(feature = "csr"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

#[cfg(not(feature = "csr"))]
impl Transport for OfflineTransport {
    fn send(&self, url: String, _request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        Box::pin(async move { Err(TransportError(format!("no network outside the browser: {url}"))) })
    }
}

#[cfg(feature = "csr")]
pub type DefaultTransport = GlooTransport;
#[cfg(not(feature = "csr"))]
pub type DefaultTransport = OfflineTransport;

// =============================================================================
// CLIENT
// =============================================================================

/// Request dispatcher bound to a session and a hard-navigation capability.
pub struct HttpClient<T> {
    base_url: String,
    session: SessionStore,
    forcer: Rc<dyn NavigationForcer>,
    transport: T,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(base_url: impl Into<String>, session: SessionStore, forcer: Rc<dyn NavigationForcer>, transport: T) -> Self {
        Self { base_url: base_url.into(), session, forcer, transport }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Absolute URL for `request`, with its query string encoded.
    pub fn url_for(&self, request: &ApiRequest) -> String {
        let mut url = join_url(&self.base_url, &request.path);
        if !request.query.is_empty() {
            let query = request
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }
        url
    }

    /// Request interception: JSON content type plus the session credential,
    /// if any. A missing token is not an error here.
    pub fn prepare(&self, mut request: ApiRequest) -> ApiRequest {
        if request.header(CONTENT_TYPE).is_none() {
            request.set_header(CONTENT_TYPE, "application/json".to_owned());
        }
        if let Some(token) = self.session.token() {
            request.set_header(AUTHORIZATION, format!("Token {token}"));
        }
        request
    }

    /// Dispatch `request` and run response interception.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] when no response arrives.
    /// - [`ApiError::Unauthorized`] on a 401 to a credentialed request, after
    ///   the session has been invalidated and `/login` forced.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let prepared = self.prepare(request);
        let sent_token = sent_credential(&prepared);
        let url = self.url_for(&prepared);

        let response = self.transport.send(url, prepared).await?;
        self.intercept(response, sent_token.as_deref())
    }

    fn intercept(&self, response: ApiResponse, sent_token: Option<&str>) -> Result<ApiResponse, ApiError> {
        if response.status != UNAUTHORIZED {
            return Ok(response);
        }
        let Some(sent_token) = sent_token else {
            // Nothing to invalidate: e.g. a bad password on the login call.
            return Ok(response);
        };

        // A login completed while this request was in flight; the rejection
        // is about the old token and must not end the new session.
        if self.session.token().as_deref() == Some(sent_token) {
            leptos::logging::warn!("session rejected by server; signing out");
            self.session.invalidate();
            self.forcer.force(LOGIN_PATH);
        }
        Err(ApiError::Unauthorized { status: response.status, body: response.body })
    }

    /// `send`, then reject non-2xx statuses.
    ///
    /// # Errors
    ///
    /// Everything `send` returns, plus [`ApiError::Status`].
    pub async fn send_checked(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status { status: response.status, body: response.body })
        }
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// See [`Self::send_checked`]; also [`ApiError::Decode`].
    pub async fn get_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.send_checked(request).await?.json()
    }

    /// Send `body` as JSON with `request`'s method and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// See [`Self::send_checked`]; also [`ApiError::Encode`] and [`ApiError::Decode`].
    pub async fn send_json<B: Serialize, R: DeserializeOwned>(&self, request: ApiRequest, body: &B) -> Result<R, ApiError> {
        self.send_checked(request.with_json(body)?).await?.json()
    }
}

fn sent_credential(request: &ApiRequest) -> Option<String> {
    request
        .header(AUTHORIZATION)
        .and_then(|v| v.strip_prefix("Token "))
        .map(str::to_owned)
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
