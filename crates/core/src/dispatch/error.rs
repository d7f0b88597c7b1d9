//! Dispatcher error types.

use thiserror::Error;

use crate::topic::TopicError;

/// Errors that abort a dispatch cycle.
///
/// Only the claim itself can fail a cycle; pipeline failures after
/// submission are reconciled into topic status, not surfaced here.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Store error: {0}")]
    Store(#[from] TopicError),
}
