//! Visitor store health checks.

use std::fs;

use tracing::{debug, error, info};

use crate::file;
use crate::log::VisitorLog;

/// Check that the store can be read and its directory written.
///
/// Runs at startup. The result is recorded in the log's health registry;
/// the server starts either way.
pub fn check_store(log: &VisitorLog) -> bool {
    let existing = match log.try_get_all() {
        Ok(events) => events.len(),
        Err(e) => {
            error!(error = %e, "Visitor store is not readable");
            return false;
        }
    };

    let probe = file::temp_path(log.path()).with_extension("probe");
    let writable = file::write_atomic(&probe, b"[]").and_then(|()| {
        fs::remove_file(&probe).map_err(|e| honeypot_core::Error::write(&probe, e))
    });

    match writable {
        Ok(()) => {
            debug!(path = %log.path().display(), "Visitor store writable");
            log.health().visitor_store.set_healthy();
            log.metrics().retained_visitors.set(existing as u64);
            info!(
                path = %log.path().display(),
                retained = existing,
                max_events = log.policy().max_events,
                "Visitor store ready"
            );
            true
        }
        Err(e) => {
            error!(error = %e, "Visitor store is not writable");
            log.health().visitor_store.set_unhealthy(e.to_string());
            false
        }
    }
}
