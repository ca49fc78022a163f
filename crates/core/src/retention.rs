//! Retention policy for the visitor store.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::limits::{MAX_STORE_BYTES, MAX_VISITORS, MIN_VISITORS_FLOOR, SIZE_TRIM_KEEP_RATIO};

/// Count and size bounds applied on every save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    /// Maximum number of retained events
    pub max_events: usize,
    /// Maximum size of the encoded store in bytes
    pub max_bytes: usize,
    /// Size trimming never goes below this many events
    pub min_events: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_events: MAX_VISITORS,
            max_bytes: MAX_STORE_BYTES,
            min_events: MIN_VISITORS_FLOOR,
        }
    }
}

/// What a trimming pass removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimOutcome {
    /// Events dropped to satisfy `max_events`.
    pub dropped_by_count: usize,
    /// Events dropped to satisfy `max_bytes`.
    pub dropped_by_size: usize,
    /// Number of size-reduction passes.
    pub size_passes: usize,
    /// The encoding is still larger than `max_bytes` (floor reached).
    pub over_budget: bool,
}

impl TrimOutcome {
    pub fn dropped(&self) -> usize {
        self.dropped_by_count + self.dropped_by_size
    }
}

/// Items that survived trimming, with their store encoding.
#[derive(Debug)]
pub struct Trimmed {
    pub encoded: Vec<u8>,
    pub outcome: TrimOutcome,
}

impl RetentionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn with_min_events(mut self, min_events: usize) -> Self {
        self.min_events = min_events;
        self
    }

    /// Keep only the newest `max_events` items. Returns how many were dropped.
    pub fn cap_count<T>(&self, items: &mut Vec<T>) -> usize {
        if items.len() <= self.max_events {
            return 0;
        }
        let excess = items.len() - self.max_events;
        items.drain(..excess);
        excess
    }

    /// Trim `items` (oldest first) in place and encode what remains.
    ///
    /// The count cap is applied first. While the encoding exceeds
    /// `max_bytes`, the oldest tenth is dropped, never going below
    /// `min_events`. If the floor is reached and the encoding is still too
    /// large, the floor-sized newest slice is written anyway and the
    /// outcome is flagged `over_budget`.
    pub fn apply<T: Serialize>(&self, items: &mut Vec<T>) -> Result<Trimmed> {
        let mut outcome = TrimOutcome {
            dropped_by_count: self.cap_count(items),
            ..TrimOutcome::default()
        };

        let mut encoded = encode(items)?;

        while encoded.len() > self.max_bytes && items.len() > self.min_events {
            let keep = ((items.len() as f64 * SIZE_TRIM_KEEP_RATIO) as usize).max(self.min_events);
            let drop = items.len() - keep;
            items.drain(..drop);

            outcome.dropped_by_size += drop;
            outcome.size_passes += 1;
            encoded = encode(items)?;
        }

        outcome.over_budget = encoded.len() > self.max_bytes;

        Ok(Trimmed { encoded, outcome })
    }
}

/// Store encoding: an indented JSON array.
pub fn encode<T: Serialize>(items: &[T]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(items)?)
}
