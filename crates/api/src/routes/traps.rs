//! Trap routes and the logging 404 fallback.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
};
use honeypot_core::VisitorCategory;
use tracing::{debug, info};

use crate::extractors::{ClientIp, UserAgent};
use crate::state::AppState;

pub const FORBIDDEN_SCAN: &str = "/forbidden-scan";
pub const JAVASCRIPT_TRAP: &str = "/javascript-trap";
pub const SECRET_PAGE: &str = "/secret-page";

/// Paths the fallback answers without logging.
const UNLOGGED_PATHS: [&str; 1] = ["/favicon.ico"];

const FORBIDDEN_SCAN_BODY: &str = "🚨 Forbidden Area Detected! 🚨\n\n\
    This route is only mentioned in robots.txt.\n\
    You went looking for content you were asked to skip.\n\
    Your IP and User-Agent have been logged. Naughty bot! 🤖\n";

const JAVASCRIPT_TRAP_BODY: &str = "🕷️ Caught in the JavaScript Trap! 🕷️\n\n\
    This link only exists inside a script comment.\n\
    Only something scraping page source would find it.\n\
    Your IP and User-Agent have been logged. Nice try, bot! 🤖\n";

const SECRET_PAGE_BODY: &str = "🚫 Gotcha! 🚫\n\n\
    This page is marked off-limits in robots.txt.\n\
    Your IP and User-Agent have been logged for posterity.\n\
    Maybe try respecting robots.txt next time? 😉\n";

const NOT_FOUND_BODY: &str = "404 page not found\n";

/// GET /forbidden-scan - listed only in robots.txt.
pub async fn forbidden_scan_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    UserAgent(ua): UserAgent,
    uri: Uri,
) -> &'static str {
    spring(&state, VisitorCategory::Forbidden, ip, ua, &uri).await;
    FORBIDDEN_SCAN_BODY
}

/// GET /javascript-trap - mentioned only in a script comment.
pub async fn javascript_trap_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    UserAgent(ua): UserAgent,
    uri: Uri,
) -> &'static str {
    spring(&state, VisitorCategory::Javascript, ip, ua, &uri).await;
    JAVASCRIPT_TRAP_BODY
}

/// GET /secret-page - disallowed in robots.txt.
pub async fn secret_page_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    UserAgent(ua): UserAgent,
    uri: Uri,
) -> &'static str {
    spring(&state, VisitorCategory::Secret, ip, ua, &uri).await;
    SECRET_PAGE_BODY
}

/// Fallback for every unknown path.
pub async fn not_found_handler(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    UserAgent(ua): UserAgent,
    uri: Uri,
) -> (StatusCode, &'static str) {
    if !UNLOGGED_PATHS.contains(&uri.path()) {
        spring(&state, VisitorCategory::NotFound, ip, ua, &uri).await;
    }
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Log a hit. The response does not depend on whether it was stored.
async fn spring(state: &AppState, category: VisitorCategory, ip: String, ua: String, uri: &Uri) {
    if category.is_trap() {
        state.metrics().trap_hits.inc();
        info!(
            source_address = %ip,
            user_agent = %ua,
            path = %uri.path(),
            trap = %category,
            "Trap sprung"
        );
    } else {
        state.metrics().not_found_hits.inc();
        debug!(source_address = %ip, path = %uri.path(), "Unknown path");
    }
    state.record(ip, ua, uri.path().to_string(), category).await;
}
