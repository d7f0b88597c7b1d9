//! Topic storage trait and error type.

use std::fmt;

use crate::topic::{Topic, TopicStatus};

/// Error type for topic store operations.
#[derive(Debug)]
pub enum TopicError {
    /// Bad input (e.g. empty topic name); no state change occurred.
    Validation(String),
    /// Database error.
    Database(String),
}

impl fmt::Display for TopicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicError::Validation(msg) => write!(f, "Invalid input: {}", msg),
            TopicError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for TopicError {}

/// Trait for topic storage backends.
///
/// `claim_next` is the sole admission point into `in_progress`: it must be
/// atomic with respect to concurrent callers (including other process
/// instances sharing the same backing store), so two simultaneous calls
/// never return overlapping topic sets.
pub trait TopicStore: Send + Sync {
    /// Insert a topic if absent. Returns the id of the inserted row, or the
    /// existing id when the name is already present (idempotent).
    ///
    /// Fails with [`TopicError::Validation`] when `name` is empty after
    /// trimming.
    fn add(&self, name: &str, category: &str, note: Option<&str>) -> Result<i64, TopicError>;

    /// Atomically select up to `limit` pending topics ordered by
    /// `created_at` ascending (oldest first), transition them to
    /// `in_progress`, and return the pre-transition snapshot.
    fn claim_next(&self, limit: usize) -> Result<Vec<Topic>, TopicError>;

    /// Mark a topic done: stamps `last_completed_at` and increments
    /// `times_completed`. No-op when the name is unknown.
    fn mark_done(&self, name: &str) -> Result<(), TopicError>;

    /// Set an arbitrary status directly, optionally recording a note
    /// (used to record `failed` with a reason from outside the done path).
    fn mark_status(
        &self,
        name: &str,
        status: TopicStatus,
        note: Option<&str>,
    ) -> Result<(), TopicError>;

    /// Transition every `in_progress` topic back to `pending` (crash
    /// recovery). Returns the number of rows changed. Never touches
    /// `failed` topics.
    fn reset_stuck(&self) -> Result<usize, TopicError>;

    /// Full snapshot ordered by `created_at` descending.
    fn list_all(&self) -> Result<Vec<Topic>, TopicError>;

    /// Read-only view of pending topics; does not claim.
    fn get_pending(&self, limit: usize) -> Result<Vec<Topic>, TopicError>;

    /// Look up a topic by name.
    fn get_by_name(&self, name: &str) -> Result<Option<Topic>, TopicError>;

    /// Look up a topic by id.
    fn get_by_id(&self, id: i64) -> Result<Option<Topic>, TopicError>;

    /// Delete a topic by name. Returns true when a row was removed.
    fn delete(&self, name: &str) -> Result<bool, TopicError>;

    /// Update a topic's category.
    fn update_category(&self, name: &str, category: &str) -> Result<(), TopicError>;
}
