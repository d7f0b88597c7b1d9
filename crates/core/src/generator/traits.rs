//! Trait definition for slide generators.

use async_trait::async_trait;

use super::error::GenerationError;
use super::types::{GenerationRequest, Slide};

/// A generator that produces carousel slides for a topic.
#[async_trait]
pub trait SlideGenerator: Send + Sync {
    /// Provider name (e.g. "openai", "mock").
    fn name(&self) -> &str;

    /// Generate slides for the given request.
    ///
    /// Implementations validate the result before returning: every slide has
    /// a non-empty heading and body, and the count matches the request's
    /// [`CarouselKind`](super::CarouselKind) expectations.
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Slide>, GenerationError>;
}
