//! Mock image sourcer for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::sourcing::{ImageSourcer, SourcedImage, SourcingError};
use crate::util::sanitize_filename;

/// Mock implementation of the ImageSourcer trait.
///
/// Returns no images by default; [`MockSourcer::with_images`] fabricates a
/// fixed number per call.
pub struct MockSourcer {
    image_count: Arc<RwLock<usize>>,
    calls: Arc<RwLock<Vec<String>>>,
    next_error: Arc<RwLock<Option<SourcingError>>>,
}

impl Default for MockSourcer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSourcer {
    pub fn new() -> Self {
        Self {
            image_count: Arc::new(RwLock::new(0)),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Sourcer that fabricates `count` images per call (capped by the
    /// requested count).
    pub fn with_images(count: usize) -> Self {
        let sourcer = Self::new();
        *sourcer.image_count.try_write().unwrap() = count;
        sourcer
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: SourcingError) {
        *self.next_error.write().await = Some(error);
    }

    /// Topic names passed to `source_images`, in call order.
    pub async fn recorded_calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl ImageSourcer for MockSourcer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn source_images(
        &self,
        topic_name: &str,
        count: usize,
    ) -> Result<Vec<SourcedImage>, SourcingError> {
        self.calls.write().await.push(topic_name.to_string());
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let available = *self.image_count.read().await;
        let safe = sanitize_filename(topic_name);
        Ok((0..available.min(count))
            .map(|i| SourcedImage {
                path: PathBuf::from(format!("/mock/{}_diagram_{}.jpg", safe, i + 1)),
                source_url: format!("https://img.example/{}/{}.jpg", safe, i + 1),
            })
            .collect())
    }
}
