//! Error types for the renderer module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering a single slide.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Render command binary not found.
    #[error("Render command not found at path: {path}")]
    CommandNotFound { path: PathBuf },

    /// The render command exited with a failure status.
    #[error("Render failed: {reason}")]
    RenderFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// The render command ran out of time.
    #[error("Render timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// The command exited successfully but produced no file.
    #[error("Render output missing: {path}")]
    OutputMissing { path: PathBuf },

    /// Output directory does not exist and could not be created.
    #[error("Failed to create output directory: {path}")]
    OutputDirectoryFailed { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn render_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::RenderFailed {
            reason: reason.into(),
            stderr,
        }
    }
}
