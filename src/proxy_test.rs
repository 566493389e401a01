use axum::http::{HeaderValue, Uri};

use super::*;
use crate::test_support;

#[test]
fn upstream_url_joins_origin_path_and_query() {
    assert_eq!(upstream_url("http://svc:8000", "customers/", None), "http://svc:8000/api/customers/");
    assert_eq!(
        upstream_url("http://svc:8000/", "financial-report/", Some("start_date=2024-01-01&end_date=2024-02-01")),
        "http://svc:8000/api/financial-report/?start_date=2024-01-01&end_date=2024-02-01"
    );
    assert_eq!(upstream_url("http://svc", "login/", Some("")), "http://svc/api/login/");
}

#[test]
fn upstream_url_keeps_percent_escapes() {
    assert_eq!(
        upstream_url("http://svc", "customers%3Fid%3D1/", None),
        "http://svc/api/customers%3Fid%3D1/"
    );
    assert_eq!(upstream_url("http://svc", "files/a%2Fb", Some("q=a%26b")), "http://svc/api/files/a%2Fb?q=a%26b");
}

#[test]
fn forwarded_headers_keeps_only_allowed_names() {
    let mut incoming = HeaderMap::new();
    incoming.insert(header::AUTHORIZATION, HeaderValue::from_static("Token abc"));
    incoming.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    incoming.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
    incoming.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    incoming.insert("x-custom", HeaderValue::from_static("1"));

    let out = forwarded_headers(&incoming);
    assert_eq!(out.len(), 2);
    assert_eq!(out.get(header::AUTHORIZATION).unwrap(), "Token abc");
    assert!(out.get(header::HOST).is_none());
    assert!(out.get("x-custom").is_none());
}

#[tokio::test]
async fn unreachable_upstream_maps_to_bad_gateway() {
    let state = test_support::state(test_support::dead_origin().await, std::env::temp_dir());
    let result = proxy(
        State(state),
        Method::GET,
        OriginalUri(Uri::from_static("/api/customers/")),
        HeaderMap::new(),
        Bytes::new(),
    )
    .await;

    let Err(err) = result else { panic!("expected proxy error") };
    assert!(matches!(err, ProxyError::Unreachable(_)));
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
