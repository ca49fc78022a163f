//! Tests for health check endpoints.

use axum::http::StatusCode;
use integration_tests::setup::TestContext;

/// Test /health endpoint returns proper structure
#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();

    for field in [
        "status",
        "visitor_store_healthy",
        "retained_visitors",
        "events_logged",
        "log_read_errors",
        "log_write_errors",
    ] {
        assert!(body.get(field).is_some(), "Response should have '{field}' field");
    }

    let status = body["status"].as_str().unwrap_or("");
    assert!(
        status == "healthy" || status == "degraded",
        "Status should be 'healthy' or 'degraded', got '{}'",
        status
    );
}

/// A successful write marks the store healthy
#[tokio::test]
async fn test_store_healthy_after_write() {
    let ctx = TestContext::new();
    assert!(visitor_store::health::check_store(&ctx.visitor_log));
    let server = ctx.server();

    server.get("/secret-page").await.assert_status_ok();

    let body: serde_json::Value = server.get("/health").await.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["visitor_store_healthy"], true);
    assert!(body.get("visitor_store_error").is_none());
    assert_eq!(body["events_logged"], 1);
    assert_eq!(body["retained_visitors"], 1);
}

/// A store that cannot be read shows up as degraded
#[tokio::test]
async fn test_corrupt_store_reports_degraded() {
    let ctx = TestContext::new();
    std::fs::write(&ctx.store_path, "nope").unwrap();
    let server = ctx.server();

    server.get("/secret-page").await.assert_status_ok();

    let body: serde_json::Value = server.get("/health").await.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["visitor_store_healthy"], false);
    assert!(body["visitor_store_error"]
        .as_str()
        .unwrap()
        .contains("STORE_003"));
    assert_eq!(body["events_logged"], 0);
}

/// Readiness and liveness stay up even when the store is broken
#[tokio::test]
async fn test_probes_ignore_store_failures() {
    let ctx = TestContext::new();
    std::fs::write(&ctx.store_path, "nope").unwrap();
    let server = ctx.server();

    server.get("/forbidden-scan").await.assert_status_ok();

    assert_eq!(server.get("/health/ready").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/health/live").await.status_code(), StatusCode::OK);

    let body: serde_json::Value = server.get("/health").await.json();
    assert_eq!(body["log_read_errors"], 1);
}
