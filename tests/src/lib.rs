//! Shared helpers for the honeypot integration tests.

pub mod fixtures;
