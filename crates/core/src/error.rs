//! Unified error types for the honeypot.
//!
//! Store error codes:
//! - STORE_001: Failed to read the visitor store
//! - STORE_002: Failed to write the visitor store
//! - STORE_003: Visitor store contents could not be decoded

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Visitor store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// STORE_001: Failed to read the visitor store
    ReadFailed,
    /// STORE_002: Failed to write the visitor store
    WriteFailed,
    /// STORE_003: Visitor store contents could not be decoded
    Corrupt,
}

impl StoreErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ReadFailed => "STORE_001",
            Self::WriteFailed => "STORE_002",
            Self::Corrupt => "STORE_003",
        }
    }
}

/// Unified error type for the honeypot.
#[derive(Debug, Error)]
pub enum Error {
    /// File system error on the visitor store.
    #[error("[{code}] {path}: {source}")]
    Store {
        code: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted data could not be decoded.
    #[error("[{code}] {path}: {source}")]
    Decode {
        code: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

}

impl Error {
    /// Create a store read error.
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Store {
            code: StoreErrorCode::ReadFailed.code(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a store write error.
    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Store {
            code: StoreErrorCode::WriteFailed.code(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a decode error for malformed store contents.
    pub fn decode(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Decode {
            code: StoreErrorCode::Corrupt.code(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Store { code, .. } => Some(code),
            Self::Decode { code, .. } => Some(code),
            _ => None,
        }
    }
}
