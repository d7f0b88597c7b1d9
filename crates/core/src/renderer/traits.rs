//! Trait definition for slide renderers.

use async_trait::async_trait;

use super::error::RenderError;
use super::theme::Theme;
use super::types::Artifact;
use crate::generator::Slide;

/// A renderer that turns slides into image artifacts.
#[async_trait]
pub trait SlideRenderer: Send + Sync {
    /// Renderer name (e.g. "command", "mock").
    fn name(&self) -> &str;

    /// Render each slide independently.
    ///
    /// Returns one entry per input slide, in order. A failed slide yields
    /// an `Err` entry without affecting the others.
    async fn render(
        &self,
        topic_id: i64,
        topic_name: &str,
        slides: &[Slide],
        theme: Theme,
    ) -> Vec<Result<Artifact, RenderError>>;
}
