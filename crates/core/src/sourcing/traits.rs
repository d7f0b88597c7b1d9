//! Trait definition for image sourcers.

use async_trait::async_trait;

use super::error::SourcingError;
use super::types::SourcedImage;

/// A sourcer that finds and downloads reference images for a topic.
#[async_trait]
pub trait ImageSourcer: Send + Sync {
    /// Sourcer name (e.g. "http", "mock").
    fn name(&self) -> &str;

    /// Find and download up to `count` images for the topic.
    ///
    /// May return fewer than requested; individual download failures are
    /// skipped rather than surfaced.
    async fn source_images(
        &self,
        topic_name: &str,
        count: usize,
    ) -> Result<Vec<SourcedImage>, SourcingError>;
}
