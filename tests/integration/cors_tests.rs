//! CORS integration tests.
//!
//! Tests verify:
//! - Default configuration allows any origin
//! - Explicit origin lists echo allowed origins and ignore others
//! - Credentials are advertised only when configured with explicit origins

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use dua_api::RouterConfig;

use super::test_utils::{send, TestStore};

fn get_from(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("origin", origin)
        .body(Body::empty())
        .unwrap()
}

fn preflight(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header("origin", origin)
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_any_origin_by_default() {
    let store = TestStore::seeded();

    let response = send(
        store.router(),
        get_from("/api/categories", "https://anywhere.example"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert!(response
        .headers()
        .get("access-control-allow-credentials")
        .is_none());
}

#[tokio::test]
async fn test_explicit_origin_is_echoed() {
    let store = TestStore::seeded();
    let config = RouterConfig::new()
        .with_cors_origins(vec!["http://localhost:3000".to_string()])
        .with_cors_credentials(true);

    let response = send(
        store.router_with(config),
        get_from("/api/categories", "http://localhost:3000"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-credentials")
            .unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_unlisted_origin_gets_no_allow_header() {
    let store = TestStore::seeded();
    let config =
        RouterConfig::new().with_cors_origins(vec!["http://localhost:3000".to_string()]);

    let response = send(
        store.router_with(config),
        get_from("/api/categories", "https://evil.example"),
    )
    .await;

    // The request itself is still served; the browser enforces the policy
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn test_preflight_lists_read_methods() {
    let store = TestStore::seeded();
    let config =
        RouterConfig::new().with_cors_origins(vec!["http://localhost:3000".to_string()]);

    let response = send(
        store.router_with(config),
        preflight("/api/duas", "http://localhost:3000"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let methods = response
        .headers()
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("GET"));
    assert!(!methods.contains("POST"));
}

#[tokio::test]
async fn test_error_responses_carry_cors_headers() {
    let store = TestStore::missing();

    let response = send(
        store.router(),
        get_from("/api/duas", "https://anywhere.example"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
