//! Pipeline error types.

use thiserror::Error;

use crate::generator::GenerationError;

/// Errors that abort a pipeline run.
///
/// Publish failures never abort the run; they are reflected in the
/// [`PublishReport`](super::PublishReport) instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Slide generation failed; nothing was rendered or published.
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// Every slide failed to render, leaving nothing to publish.
    #[error("No slides rendered")]
    NothingRendered,
}
