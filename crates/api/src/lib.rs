//! HTTP layer for the honeypot.

pub mod extractors;
pub mod render;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
