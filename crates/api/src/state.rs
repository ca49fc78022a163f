//! Application state shared across handlers.

use std::sync::Arc;

use honeypot_core::{VisitorCategory, VisitorEvent};
use telemetry::{HealthRegistry, Metrics};
use tokio::task::{self, JoinError};
use tracing::error;
use visitor_store::VisitorLog;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The one visitor log every handler writes to
    pub visitor_log: Arc<VisitorLog>,
}

impl AppState {
    pub fn new(visitor_log: Arc<VisitorLog>) -> Self {
        Self { visitor_log }
    }

    /// Counters the visitor log reports into.
    pub fn metrics(&self) -> &'static Metrics {
        self.visitor_log.metrics()
    }

    /// Health registry the visitor log reports into.
    pub fn health(&self) -> &'static HealthRegistry {
        self.visitor_log.health()
    }

    /// Record a visit off the async runtime.
    ///
    /// The store does blocking file I/O under its lock. Returns whether the
    /// event was stored; failures have already been logged.
    pub async fn record(
        &self,
        source_address: String,
        user_agent: String,
        request_path: String,
        category: VisitorCategory,
    ) -> bool {
        let log = Arc::clone(&self.visitor_log);
        let stored = task::spawn_blocking(move || {
            log.add(source_address, user_agent, request_path, category)
        })
        .await;

        stored.unwrap_or_else(|e| {
            error!(error = %e, category = %category, "Visitor log task failed");
            false
        })
    }

    /// Snapshot of every retained visitor, oldest first.
    pub async fn visitors(&self) -> Result<Vec<VisitorEvent>, JoinError> {
        let log = Arc::clone(&self.visitor_log);
        task::spawn_blocking(move || log.get_all()).await
    }
}
