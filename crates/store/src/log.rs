//! The visitor log handle shared by request handlers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use honeypot_core::{Result, RetentionPolicy, TrimOutcome, VisitorCategory, VisitorEvent};
use parking_lot::Mutex;
use telemetry::{health, metrics, HealthRegistry, Metrics};
use tracing::{debug, error, warn};

use crate::config::StoreConfig;
use crate::file;

/// Durable, capacity-bounded record of visitor events.
///
/// One instance owns one store file. Clone the surrounding `Arc` to share
/// it; the lock is internal and covers the whole load, modify, save cycle.
/// Counters and store health go to the global telemetry registries unless
/// [`VisitorLog::with_telemetry`] points them elsewhere.
pub struct VisitorLog {
    path: PathBuf,
    policy: RetentionPolicy,
    state: Mutex<LogState>,
    metrics: &'static Metrics,
    health: &'static HealthRegistry,
}

impl fmt::Debug for VisitorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitorLog")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct LogState {
    /// Capture time of the last event this process wrote.
    last_observed: Option<DateTime<Utc>>,
}

impl VisitorLog {
    /// Open the log described by `config` with the fixed retention limits.
    pub fn open(config: &StoreConfig) -> Self {
        Self::new(config.path.clone())
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_policy(path, RetentionPolicy::default())
    }

    pub fn with_policy(path: impl Into<PathBuf>, policy: RetentionPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            state: Mutex::new(LogState::default()),
            metrics: metrics(),
            health: health(),
        }
    }

    /// Report into the given registries instead of the global ones.
    pub fn with_telemetry(
        mut self,
        metrics: &'static Metrics,
        health: &'static HealthRegistry,
    ) -> Self {
        self.metrics = metrics;
        self.health = health;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    pub fn metrics(&self) -> &'static Metrics {
        self.metrics
    }

    pub fn health(&self) -> &'static HealthRegistry {
        self.health
    }

    /// Record a visit. Returns whether the event reached the store.
    ///
    /// Failures are logged and counted, never propagated: the request that
    /// triggered the visit must still succeed.
    pub fn add(
        &self,
        source_address: impl Into<String>,
        user_agent: impl Into<String>,
        request_path: impl Into<String>,
        category: VisitorCategory,
    ) -> bool {
        match self.try_add(source_address, user_agent, request_path, category) {
            Ok(event) => {
                debug!(
                    source_address = %event.source_address(),
                    request_path = %event.request_path(),
                    category = %category,
                    "Visitor recorded"
                );
                true
            }
            Err(e) => {
                error!(
                    error = %e,
                    path = %self.path.display(),
                    category = %category,
                    "Failed to record visitor"
                );
                false
            }
        }
    }

    /// Record a visit, reporting store failures to the caller.
    pub fn try_add(
        &self,
        source_address: impl Into<String>,
        user_agent: impl Into<String>,
        request_path: impl Into<String>,
        category: VisitorCategory,
    ) -> Result<VisitorEvent> {
        let mut state = self.state.lock();

        let mut events = file::read_events(&self.path).inspect_err(|e| {
            self.metrics.log_read_errors.inc();
            self.health.visitor_store.set_unhealthy(e.to_string());
        })?;

        let observed_at = next_timestamp(
            Utc::now(),
            events.last().map(VisitorEvent::observed_at).max(state.last_observed),
        );
        let event =
            VisitorEvent::new(source_address, user_agent, request_path, category, observed_at);
        events.push(event.clone());

        let start = Instant::now();
        let trimmed = self.policy.apply(&mut events)?;

        file::write_atomic(&self.path, &trimmed.encoded).inspect_err(|e| {
            self.metrics.log_write_errors.inc();
            self.health.visitor_store.set_unhealthy(e.to_string());
        })?;

        // Only report drops that actually reached the disk.
        self.report_trim(&trimmed.outcome, events.len());
        self.metrics
            .save_latency_ms
            .observe(start.elapsed().as_millis() as u64);
        self.metrics.events_logged.inc();
        self.metrics.retained_visitors.set(events.len() as u64);
        self.health.visitor_store.set_healthy();

        state.last_observed = Some(observed_at);
        Ok(event)
    }

    /// All retained events, oldest first.
    ///
    /// A store that cannot be read yields an empty list; the failure is
    /// logged and counted.
    pub fn get_all(&self) -> Vec<VisitorEvent> {
        self.try_get_all().unwrap_or_else(|e| {
            error!(error = %e, path = %self.path.display(), "Failed to load visitors");
            Vec::new()
        })
    }

    /// All retained events, oldest first, reporting store failures.
    pub fn try_get_all(&self) -> Result<Vec<VisitorEvent>> {
        let _state = self.state.lock();

        let mut events = file::read_events(&self.path).inspect_err(|e| {
            self.metrics.log_read_errors.inc();
            self.health.visitor_store.set_unhealthy(e.to_string());
        })?;

        let dropped = self.policy.cap_count(&mut events);
        if dropped > 0 {
            debug!(dropped, kept = events.len(), "Store over count limit on load");
        }

        self.metrics.retained_visitors.set(events.len() as u64);
        Ok(events)
    }

    fn report_trim(&self, outcome: &TrimOutcome, kept: usize) {
        if outcome.dropped() == 0 {
            return;
        }
        self.metrics.events_trimmed.inc_by(outcome.dropped() as u64);

        if outcome.dropped_by_count > 0 {
            debug!(
                dropped = outcome.dropped_by_count,
                max_events = self.policy.max_events,
                "Evicted oldest visitors"
            );
        }
        if outcome.dropped_by_size > 0 {
            warn!(
                dropped = outcome.dropped_by_size,
                passes = outcome.size_passes,
                kept,
                max_bytes = self.policy.max_bytes,
                "Trimmed visitor log to fit size limit"
            );
        }
        if outcome.over_budget {
            warn!(
                kept,
                max_bytes = self.policy.max_bytes,
                "Visitor log still over size limit at minimum retention"
            );
        }
    }
}

/// Current time, never earlier than `floor`.
fn next_timestamp(now: DateTime<Utc>, floor: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match floor {
        Some(floor) if floor > now => floor,
        _ => now,
    }
}
