//! Topic record and status types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    /// Waiting to be claimed.
    Pending,
    /// Claimed by a worker, pipeline running.
    InProgress,
    /// Pipeline completed, every artifact published.
    Done,
    /// Pipeline failed (or partially failed); sticky until reset manually.
    Failed,
}

impl TopicStatus {
    /// Stable string form used in the database column and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::Pending => "pending",
            TopicStatus::InProgress => "in_progress",
            TopicStatus::Done => "done",
            TopicStatus::Failed => "failed",
        }
    }

    /// Parse the database column value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TopicStatus::Pending),
            "in_progress" => Some(TopicStatus::InProgress),
            "done" => Some(TopicStatus::Done),
            "failed" => Some(TopicStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of schedulable carousel work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Monotonically assigned integer identity.
    pub id: i64,
    /// Unique human-readable name (natural key).
    pub name: String,
    /// Current lifecycle status.
    pub status: TopicStatus,
    /// Creation timestamp; the sole fairness ordering key, never mutated.
    pub created_at: DateTime<Utc>,
    /// Set on every transition to `done`.
    pub last_completed_at: Option<DateTime<Utc>>,
    /// Incremented on every transition to `done`.
    pub times_completed: u32,
    /// Free-text classification, set at creation, mutable.
    pub category: String,
    /// Optional annotation; the dispatcher records failure reasons here.
    pub note: Option<String>,
}
