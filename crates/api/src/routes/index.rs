//! Index page and robots.txt.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};
use tracing::debug;

use crate::render;
use crate::response::ApiError;
use crate::state::AppState;

/// GET / - Public page listing everyone caught so far.
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let visitors = state.visitors().await?;
    state.metrics().index_renders.inc();
    debug!(visitors = visitors.len(), "Rendering index");

    Ok(Html(render::index_page(&visitors)))
}

/// GET /robots.txt
pub async fn robots_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render::ROBOTS_TXT,
    )
}
