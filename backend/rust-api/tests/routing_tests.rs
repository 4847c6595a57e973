mod common;

use axum::http::StatusCode;
use common::{assert_error_envelope, create_test_app, send};

#[tokio::test]
async fn test_index() {
    let app = create_test_app();
    let (status, body) = send(&app.router, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Home page");
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, body) = send(&app.router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["dependencies"]["store"]["status"], "healthy");
    assert_eq!(body["dependencies"]["store"]["backend"], "memory");
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let app = create_test_app();
    let (status, body) = send(&app.router, "GET", "/nope", None).await;
    assert_error_envelope(status, &body, 404, "Resource not found");
}

#[tokio::test]
async fn test_wrong_method_uses_error_envelope() {
    let app = create_test_app();
    let (status, body) = send(&app.router, "PATCH", "/questions", None).await;
    assert_error_envelope(status, &body, 405, "method not allowed");
}

#[tokio::test]
async fn test_metrics_exposes_request_counter() {
    let app = create_test_app();
    send(&app.router, "GET", "/categories", None).await;

    let (status, body) = send(&app.router, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("http_requests_total"));
}
