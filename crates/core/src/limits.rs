//! Capacity limits for the visitor store.
//!
//! These are fixed constants. They are not read from configuration or the
//! environment; tests construct a smaller [`RetentionPolicy`] directly.
//!
//! [`RetentionPolicy`]: crate::retention::RetentionPolicy

/// Maximum number of visitor events retained.
pub const MAX_VISITORS: usize = 10_000;

/// Maximum serialized size of the store in bytes (100MB).
pub const MAX_STORE_BYTES: usize = 100 * 1024 * 1024;

/// Fewest events size trimming will reduce the store to.
///
/// At this floor the most recent events are kept even if the file is
/// still over [`MAX_STORE_BYTES`].
pub const MIN_VISITORS_FLOOR: usize = 100;

/// Fraction of events kept on each size-trimming pass.
pub const SIZE_TRIM_KEEP_RATIO: f64 = 0.9;
