//! Durable visitor log for the honeypot.
//!
//! Visitor events are kept in a single JSON file. Every write reloads the
//! file, appends, trims to the [`RetentionPolicy`] and atomically replaces
//! the file, all under one lock.
//!
//! [`RetentionPolicy`]: honeypot_core::RetentionPolicy

pub mod config;
pub mod file;
pub mod health;
pub mod log;

pub use config::*;
pub use log::*;
