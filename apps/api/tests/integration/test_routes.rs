use super::helpers::{TestGenerator, TestStorage, read_json, read_text, send, spawn_app};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;

#[tokio::test]
async fn root_returns_greeting() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem("unused"));

    let req = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(read_text(res).await, "Hello Poesy!");
}

#[tokio::test]
async fn health_reports_version() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem("unused"));

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn cors_preflight_is_permissive() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem("unused"));

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/generate")
        .header(header::ORIGIN, "https://gallery.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-client-version")
        .body(Body::empty())
        .expect("failed to build preflight request");
    let res = send(&app.app, req).await;

    assert!(res.status().is_success(), "preflight failed: {}", res.status());
    let allowed = |name: header::HeaderName| {
        res.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    assert_eq!(allowed(header::ACCESS_CONTROL_ALLOW_ORIGIN).as_deref(), Some("*"));
    assert_eq!(allowed(header::ACCESS_CONTROL_ALLOW_HEADERS).as_deref(), Some("*"));
    assert_eq!(allowed(header::ACCESS_CONTROL_ALLOW_METHODS).as_deref(), Some("*"));
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = spawn_app(TestStorage::default(), TestGenerator::poem("unused"));

    let req = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;

    assert_eq!(res.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(res.headers()[header::X_FRAME_OPTIONS], "DENY");
}
