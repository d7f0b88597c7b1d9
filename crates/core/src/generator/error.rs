//! Error types for slide generation.

use thiserror::Error;

/// Errors that can occur while generating slides.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(String),

    /// The model responded but the slides were unusable
    /// (wrong count, empty headings or bodies).
    #[error("Invalid slides: {0}")]
    InvalidSlides(String),

    #[error("Generator not configured")]
    NotConfigured,
}
