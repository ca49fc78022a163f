//! Visitor event definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which trap or condition caused a visit to be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitorCategory {
    /// Route listed only in robots.txt.
    Forbidden,
    /// Route mentioned only inside a script comment on the index page.
    Javascript,
    /// Route marked off-limits in robots.txt and linked with nofollow.
    Secret,
    /// Any unknown path.
    #[serde(alias = "404")]
    NotFound,
}

impl VisitorCategory {
    /// Stable wire name, as written to the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::Javascript => "javascript",
            Self::Secret => "secret",
            Self::NotFound => "not_found",
        }
    }

    /// Whether the visit hit one of the deliberate trap routes.
    pub fn is_trap(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

impl fmt::Display for VisitorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged hit.
///
/// Fields are private so an event cannot change after it is recorded.
/// The legacy PascalCase keys (`IP`, `UserAgent`, `Timestamp`, `Path`,
/// `Type`) are accepted when reading older store files. Files from before
/// paths and categories were recorded lack those two keys; such records
/// read with an empty path and the `not_found` category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorEvent {
    #[serde(alias = "IP")]
    source_address: String,
    #[serde(alias = "UserAgent", default)]
    user_agent: String,
    #[serde(alias = "Timestamp")]
    observed_at: DateTime<Utc>,
    #[serde(alias = "Path", default)]
    request_path: String,
    #[serde(alias = "Type", default = "untyped_category")]
    category: VisitorCategory,
}

fn untyped_category() -> VisitorCategory {
    VisitorCategory::NotFound
}

impl VisitorEvent {
    pub fn new(
        source_address: impl Into<String>,
        user_agent: impl Into<String>,
        request_path: impl Into<String>,
        category: VisitorCategory,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source_address: source_address.into(),
            user_agent: user_agent.into(),
            observed_at,
            request_path: request_path.into(),
            category,
        }
    }

    pub fn source_address(&self) -> &str {
        &self.source_address
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    pub fn category(&self) -> VisitorCategory {
        self.category
    }
}
