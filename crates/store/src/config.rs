//! Visitor store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Visitor store configuration.
///
/// Only the location is configurable; capacity limits are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON file holding the visitor log
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from("visitors.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
