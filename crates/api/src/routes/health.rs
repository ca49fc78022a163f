//! Health check endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /health - Full health check.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let health = state.health();
    let m = state.metrics();

    Json(HealthResponse {
        status: health.report().status,
        visitor_store_healthy: health.visitor_store.is_healthy(),
        visitor_store_error: health.visitor_store.message(),
        retained_visitors: m.retained_visitors.get(),
        events_logged: m.events_logged.get(),
        log_read_errors: m.log_read_errors.get(),
        log_write_errors: m.log_write_errors.get(),
    })
}

/// GET /health/ready - Readiness probe (can accept traffic).
pub async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    if state.health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - Liveness probe (service is running).
pub async fn live_handler(State(state): State<AppState>) -> StatusCode {
    if state.health().is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
