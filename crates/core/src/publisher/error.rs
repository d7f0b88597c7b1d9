//! Error types for publishing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while publishing.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Image not found: {path}")]
    ImageNotFound { path: PathBuf },

    /// Carousel constraints violated (2 to 10 images).
    #[error("Invalid carousel: {0}")]
    InvalidCarousel(String),

    #[error("Publisher not configured")]
    NotConfigured,
}
