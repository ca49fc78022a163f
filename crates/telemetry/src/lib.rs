//! Operational telemetry for the honeypot.
//!
//! Everything here is for operators: structured logs, in-process counters,
//! and the health registry behind the `/health` endpoints.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
