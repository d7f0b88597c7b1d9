//! Pipeline result types.

use serde::{Deserialize, Serialize};

/// Aggregate outcome of the publish phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishOutcome {
    /// Every attempted artifact was published.
    Success,
    /// At least one artifact failed; the rest were still attempted.
    PartialFailure,
}

/// Report of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReport {
    pub outcome: PublishOutcome,
    /// Artifacts that went live.
    pub published: usize,
    /// Artifacts a publish was attempted for.
    pub attempted: usize,
}

impl PublishReport {
    pub fn is_success(&self) -> bool {
        self.outcome == PublishOutcome::Success
    }
}
