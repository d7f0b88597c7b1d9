//! Trait definition for publishers.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::error::PublishError;

/// A publisher that posts images to a social platform.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publisher name (e.g. "graph_api", "mock").
    fn name(&self) -> &str;

    /// Publish a single image with a caption.
    ///
    /// `Ok(true)` means the post went live; `Ok(false)` means the platform
    /// rejected it without a transport error (treated as a failed artifact,
    /// not a pipeline abort). `Err` is reserved for transport and API
    /// failures.
    async fn publish(&self, image: &Path, caption: &str) -> Result<bool, PublishError>;

    /// Publish 2 to 10 images as a single carousel post.
    async fn publish_carousel(
        &self,
        images: &[PathBuf],
        caption: &str,
    ) -> Result<bool, PublishError>;
}
