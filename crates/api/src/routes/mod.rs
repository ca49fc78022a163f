//! HTTP routes.
//!
//! Trap routes are never linked normally: `/forbidden-scan` appears only in
//! robots.txt, `/secret-page` is disallowed there and linked with
//! `nofollow`, and `/javascript-trap` sits in a script comment on the
//! index page. Every other unknown path is logged as a plain 404.

pub mod health;
pub mod index;
pub mod traps;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::state::AppState;

/// Creates the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index_handler))
        .route("/robots.txt", get(index::robots_handler))
        .route(traps::FORBIDDEN_SCAN, get(traps::forbidden_scan_handler))
        .route(traps::JAVASCRIPT_TRAP, get(traps::javascript_trap_handler))
        .route(traps::SECRET_PAGE, get(traps::secret_page_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .fallback(traps::not_found_handler)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
