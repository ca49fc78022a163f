//! Core types, retention policy, and client address resolution for the honeypot.

pub mod client_ip;
pub mod error;
pub mod events;
pub mod limits;
pub mod retention;

pub use client_ip::*;
pub use error::{Error, Result};
pub use events::*;
pub use retention::*;
