use futures::executor::block_on;

use super::*;
use crate::net::test_support::{ScriptedTransport, reply};
use crate::util::storage::{KeyValueStore, TOKEN_KEY};
use crate::util::test_support::{MemoryStorage, RecordingForcer};

// =============================================================
// Helpers
// =============================================================

struct Harness {
    client: HttpClient<ScriptedTransport>,
    session: SessionStore,
    storage: Rc<MemoryStorage>,
    forcer: Rc<RecordingForcer>,
}

fn harness(storage: MemoryStorage, transport: ScriptedTransport) -> Harness {
    let storage = Rc::new(storage);
    let session = SessionStore::initialize(storage.clone());
    let forcer = Rc::new(RecordingForcer::new());
    let client = HttpClient::new(DEFAULT_BASE_URL, session.clone(), forcer.clone(), transport);
    Harness { client, session, storage, forcer }
}

fn with_token(token: &str) -> MemoryStorage {
    MemoryStorage::with_entry(TOKEN_KEY, token)
}

impl Harness {
    fn last_sent(&self) -> ApiRequest {
        self.client.transport().sent.borrow().last().cloned().unwrap().1
    }
}

// =============================================================
// Request interception
// =============================================================

#[test]
fn prepare_attaches_token_credential() {
    let h = harness(with_token("abc"), ScriptedTransport::default());
    let prepared = h.client.prepare(ApiRequest::get("customers/"));
    assert_eq!(prepared.header("authorization"), Some("Token abc"));
    assert_eq!(prepared.header(CONTENT_TYPE), Some("application/json"));
}

#[test]
fn prepare_without_token_sends_as_is() {
    let h = harness(MemoryStorage::new(), ScriptedTransport::default());
    let prepared = h.client.prepare(ApiRequest::get("customers/"));
    assert_eq!(prepared.header(AUTHORIZATION), None);
}

#[test]
fn prepare_keeps_explicit_content_type() {
    let h = harness(MemoryStorage::new(), ScriptedTransport::default());
    let mut request = ApiRequest::post("upload/");
    request.set_header("content-type", "text/plain".to_owned());
    let prepared = h.client.prepare(request);
    assert_eq!(prepared.header(CONTENT_TYPE), Some("text/plain"));
    assert_eq!(prepared.headers.len(), 1);
}

#[test]
fn url_for_joins_base_and_encodes_query() {
    let h = harness(MemoryStorage::new(), ScriptedTransport::default());
    let request = ApiRequest::get("/financial-report/")
        .with_query("start_date", "2024-01-01")
        .with_query("note", "a b&c");
    assert_eq!(
        h.client.url_for(&request),
        "/api/financial-report/?start_date=2024-01-01&note=a%20b%26c"
    );
}

// =============================================================
// Response interception
// =============================================================

#[test]
fn scenario_auth_failure_invalidates_and_forces_login() {
    let h = harness(with_token("expired"), ScriptedTransport::replying(reply(401, r#"{"detail":"Invalid token."}"#)));

    let err = block_on(h.client.send(ApiRequest::get("customers/"))).unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { status: 401, .. }));
    assert_eq!(err.detail().as_deref(), Some("Invalid token."));
    assert!(!h.storage.contains(TOKEN_KEY));
    assert!(!h.session.is_authenticated());
    assert_eq!(h.forcer.visits(), vec!["/login".to_owned()]);
}

#[test]
fn scenario_public_request_without_token_passes_through() {
    for status in [200, 400, 401, 404, 500] {
        let h = harness(MemoryStorage::new(), ScriptedTransport::replying(reply(status, "body")));
        let resp = block_on(h.client.send(ApiRequest::post("login/"))).unwrap();

        assert_eq!(resp, ApiResponse { status, body: "body".to_owned() });
        assert_eq!(h.last_sent().header(AUTHORIZATION), None);
        assert!(h.forcer.visits().is_empty());
    }
}

#[test]
fn scenario_server_error_leaves_session_alone() {
    let h = harness(with_token("abc"), ScriptedTransport::replying(reply(500, "boom")));

    let resp = block_on(h.client.send(ApiRequest::get("customers/"))).unwrap();
    assert_eq!(resp.status, 500);
    assert_eq!(resp.body, "boom");
    assert!(h.session.is_authenticated());
    assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("abc"));
    assert!(h.forcer.visits().is_empty());
}

#[test]
fn send_checked_reports_status_untouched() {
    let h = harness(with_token("abc"), ScriptedTransport::replying(reply(503, "busy")));
    let err = block_on(h.client.send_checked(ApiRequest::get("customers/"))).unwrap_err();
    assert_eq!(err, ApiError::Status { status: 503, body: "busy".to_owned() });
    assert!(h.session.is_authenticated());
}

#[test]
fn transport_failure_propagates_untouched() {
    let h = harness(
        with_token("abc"),
        ScriptedTransport::replying(Err(TransportError("connection refused".to_owned()))),
    );
    let err = block_on(h.client.send(ApiRequest::get("customers/"))).unwrap_err();
    assert_eq!(err, ApiError::Transport(TransportError("connection refused".to_owned())));
    assert!(h.session.is_authenticated());
    assert!(h.forcer.visits().is_empty());
}

#[test]
fn stale_rejection_does_not_end_newer_session() {
    let h = harness(with_token("old"), ScriptedTransport::replying(reply(401, "")));
    let session = h.session.clone();
    *h.client.transport().on_send.borrow_mut() = Some(Box::new(move || {
        session.establish("new").unwrap();
    }));

    let err = block_on(h.client.send(ApiRequest::get("customers/"))).unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert!(h.session.is_authenticated());
    assert_eq!(h.storage.get(TOKEN_KEY).as_deref(), Some("new"));
    assert!(h.forcer.visits().is_empty());
}

#[test]
fn injection_happens_before_transport_sees_request() {
    let h = harness(with_token("abc"), ScriptedTransport::replying(reply(200, "[]")));
    block_on(h.client.send(ApiRequest::get("customers/"))).unwrap();
    let (url, sent) = h.client.transport().sent.borrow()[0].clone();
    assert_eq!(url, "/api/customers/");
    assert_eq!(sent.header(AUTHORIZATION), Some("Token abc"));
}

// =============================================================
// Typed helpers
// =============================================================

#[test]
fn get_json_decodes_success_body() {
    let h = harness(with_token("abc"), ScriptedTransport::replying(reply(200, r#"{"n": 3}"#)));
    let value: serde_json::Value = block_on(h.client.get_json(ApiRequest::get("x/"))).unwrap();
    assert_eq!(value["n"], 3);
}

#[test]
fn get_json_reports_decode_error() {
    let h = harness(with_token("abc"), ScriptedTransport::replying(reply(200, "not json")));
    let err = block_on(h.client.get_json::<serde_json::Value>(ApiRequest::get("x/"))).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn send_json_serializes_body() {
    let h = harness(with_token("abc"), ScriptedTransport::replying(reply(201, r#"{"ok": true}"#)));
    let body = serde_json::json!({ "first_name": "Ada" });
    let _: serde_json::Value = block_on(h.client.send_json(ApiRequest::post("customers/"), &body)).unwrap();
    assert_eq!(h.last_sent().body.as_deref(), Some(r#"{"first_name":"Ada"}"#));
}
