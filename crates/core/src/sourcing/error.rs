//! Error types for image sourcing.

use thiserror::Error;

/// Errors that can occur while sourcing images.
#[derive(Debug, Error)]
pub enum SourcingError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Search API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
