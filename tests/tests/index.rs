//! Tests for the index page and robots.txt.

use axum::http::StatusCode;
use integration_tests::{fixtures, setup::TestContext};

/// robots.txt is plain text and disallows the traps
#[tokio::test]
async fn test_robots_txt() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/robots.txt").await;
    response.assert_status_ok();

    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));

    let body = response.text();
    assert!(body.contains("User-agent: *"));
    assert!(body.contains("Disallow: /secret-page"));
    assert!(body.contains("Disallow: /forbidden-scan"));
}

/// A fresh index shows an empty table
#[tokio::test]
async fn test_empty_index() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/").await;
    response.assert_status_ok();

    let body = response.text();
    assert!(body.contains("Caught so far (0)"));
    assert!(body.contains("No visitors caught yet."));
}

/// The index lists caught visitors with untrusted fields escaped
#[tokio::test]
async fn test_index_lists_escaped_visitors() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .get("/secret-page")
        .add_header("User-Agent", "<script>alert('pwned')</script>")
        .add_header("X-Real-IP", "192.0.2.99")
        .await
        .assert_status_ok();
    server
        .get("/javascript-trap")
        .add_header("User-Agent", fixtures::SCRAPER_UA)
        .await
        .assert_status_ok();

    let body = server.get("/").await.text();

    assert!(body.contains("Caught so far (2)"));
    assert!(body.contains("192.0.2.99"));
    assert!(body.contains("&lt;script&gt;alert(&#39;pwned&#39;)&lt;/script&gt;"));
    assert!(!body.contains("<script>alert('pwned')</script>"));

    // Oldest first.
    let secret = body.find("<td class=\"category\">secret</td>").unwrap();
    let javascript = body.find("<td class=\"category\">javascript</td>").unwrap();
    assert!(secret < javascript);
}

/// The index hints at the traps without linking them normally
#[tokio::test]
async fn test_index_contains_bait() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body = server.get("/").await.text();
    assert!(body.contains("// old admin endpoint, keep out of the nav: /javascript-trap"));
    assert!(body.contains("rel=\"nofollow\""));
}

/// A corrupt store renders an empty page instead of failing
#[tokio::test]
async fn test_index_with_corrupt_store() {
    let ctx = TestContext::new();
    std::fs::write(&ctx.store_path, "[{ broken").unwrap();
    let server = ctx.server();

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Caught so far (0)"));
}

/// Oversized visitors are trimmed to the byte budget, newest kept
#[tokio::test]
async fn test_oversized_user_agents_trimmed() {
    let policy = honeypot_core::RetentionPolicy::new()
        .with_max_bytes(32 * 1024)
        .with_min_events(2);
    let ctx = TestContext::with_policy(policy);
    let server = ctx.server();
    let ua = fixtures::oversized_user_agent(4 * 1024);

    for i in 0..20 {
        server
            .get(&format!("/junk-{i}"))
            .add_header("User-Agent", ua.as_str())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    let size = std::fs::metadata(&ctx.store_path).unwrap().len();
    assert!(size <= 32 * 1024, "store is {size} bytes");

    let visitors = ctx.visitors();
    assert!(visitors.len() < 20);
    assert_eq!(visitors.last().unwrap().request_path(), "/junk-19");
}
