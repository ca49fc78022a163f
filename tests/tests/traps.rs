//! Tests for the trap routes and the logging 404 fallback.

use axum::http::StatusCode;
use api::AppState;
use honeypot_core::VisitorCategory;
use integration_tests::{fixtures, setup::TestContext};

/// Each trap answers 200 and records one visitor with its category
#[tokio::test]
async fn test_traps_record_category() {
    for (path, category) in fixtures::trap_routes() {
        let ctx = TestContext::new();
        let server = ctx.server();

        let response = server
            .get(path)
            .add_header("User-Agent", fixtures::SCRAPER_UA)
            .add_header("X-Forwarded-For", fixtures::CLIENT_IP)
            .await;
        response.assert_status_ok();
        assert!(response.text().contains("logged"));

        let visitors = ctx.visitors();
        assert_eq!(visitors.len(), 1, "{path} should record one visitor");
        assert_eq!(visitors[0].category().as_str(), category);
        assert_eq!(visitors[0].request_path(), path);
        assert_eq!(visitors[0].user_agent(), fixtures::SCRAPER_UA);
        assert_eq!(visitors[0].source_address(), fixtures::CLIENT_IP);
    }
}

/// Unknown paths are 404 and logged as not_found
#[tokio::test]
async fn test_unknown_path_logged_as_not_found() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/wp-login.php").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "404 page not found\n");

    let visitors = ctx.visitors();
    assert_eq!(visitors.len(), 1);
    assert_eq!(visitors[0].category(), VisitorCategory::NotFound);
    assert_eq!(visitors[0].request_path(), "/wp-login.php");
}

/// Trap hits and plain 404s are counted separately
#[tokio::test]
async fn test_hits_counted_by_kind() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server.get("/secret-page").await.assert_status_ok();
    server.get("/javascript-trap").await.assert_status_ok();
    server.get("/.env").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/favicon.ico").await.assert_status(StatusCode::NOT_FOUND);

    let metrics = ctx.visitor_log.metrics();
    assert_eq!(metrics.trap_hits.get(), 2);
    assert_eq!(metrics.not_found_hits.get(), 1);
    assert_eq!(metrics.events_logged.get(), 3);
}

/// favicon requests are 404 but not logged
#[tokio::test]
async fn test_favicon_not_logged() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server.get("/favicon.ico").await.assert_status(StatusCode::NOT_FOUND);

    assert!(ctx.visitors().is_empty());
}

/// Public pages are not logged
#[tokio::test]
async fn test_index_and_robots_not_logged() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server.get("/").await.assert_status_ok();
    server.get("/robots.txt").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();

    assert!(ctx.visitors().is_empty());
}

/// Without proxy headers the peer address, or "unknown", is recorded
#[tokio::test]
async fn test_missing_address_and_user_agent() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server.get("/secret-page").await.assert_status_ok();

    let visitors = ctx.visitors();
    let addr = visitors[0].source_address();
    assert!(addr == "unknown" || addr.parse::<std::net::IpAddr>().is_ok(), "got {addr}");
    assert_eq!(visitors[0].user_agent(), "");
}

/// Cloudflare's header wins over X-Forwarded-For
#[tokio::test]
async fn test_proxy_header_priority() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .get("/forbidden-scan")
        .add_header("X-Forwarded-For", "198.51.100.1, 10.0.0.1")
        .add_header("CF-Connecting-IP", "192.0.2.44")
        .await
        .assert_status_ok();

    assert_eq!(ctx.visitors()[0].source_address(), "192.0.2.44");
}

/// Capacity 3, four hits: the first is evicted and order is kept
#[tokio::test]
async fn test_capacity_eviction_through_http() {
    let ctx = TestContext::with_capacity(3);
    let server = ctx.server();

    for path in ["/forbidden-scan", "/secret-page", "/javascript-trap", "/nope"] {
        server.get(path).await;
    }

    let categories: Vec<VisitorCategory> = ctx.visitors().iter().map(|v| v.category()).collect();
    assert_eq!(
        categories,
        vec![
            VisitorCategory::Secret,
            VisitorCategory::Javascript,
            VisitorCategory::NotFound
        ]
    );
}

/// A broken store never fails the trap response
#[tokio::test]
async fn test_trap_succeeds_when_store_is_corrupt() {
    let ctx = TestContext::new();
    std::fs::write(&ctx.store_path, "definitely not json").unwrap();
    let server = ctx.server();

    let response = server.get("/secret-page").await;
    response.assert_status_ok();

    let response = server.get("/missing").await;
    response.assert_status(StatusCode::NOT_FOUND);

    assert!(ctx.visitors().is_empty());
}

/// Concurrent visits through the shared state are all recorded
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_visits_are_all_recorded() {
    let ctx = TestContext::new();
    let state = AppState::new(ctx.visitor_log.clone());

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let state = state.clone();
            tokio::spawn(async move {
                state
                    .record(
                        format!("10.1.0.{i}"),
                        fixtures::SCRAPER_UA.to_string(),
                        format!("/probe-{i}"),
                        VisitorCategory::NotFound,
                    )
                    .await
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let visitors = ctx.visitors();
    assert_eq!(visitors.len(), 20);
    assert!(visitors
        .windows(2)
        .all(|w| w[0].observed_at() <= w[1].observed_at()));
}

/// Visits survive reopening the store
#[tokio::test]
async fn test_visits_survive_reopen() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server
        .get("/javascript-trap")
        .add_header("User-Agent", fixtures::SCRAPER_UA)
        .await
        .assert_status_ok();

    let reopened = ctx.reopen().get_all();
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened[0].category(), VisitorCategory::Javascript);
    assert_eq!(reopened[0].user_agent(), fixtures::SCRAPER_UA);
}
