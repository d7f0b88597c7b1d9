//! Mock publisher for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::publisher::{PublishError, Publisher};

/// A recorded publish call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedPublish {
    pub path: PathBuf,
    pub caption: String,
    /// `Some(true)` published, `Some(false)` rejected, `None` errored.
    pub result: Option<bool>,
}

/// Mock implementation of the Publisher trait.
///
/// Publishes succeed by default. Specific call indices (by order of
/// arrival) can be scripted to error or to be rejected by the platform.
pub struct MockPublisher {
    publishes: Arc<RwLock<Vec<RecordedPublish>>>,
    carousels: Arc<RwLock<Vec<(Vec<PathBuf>, String)>>>,
    fail_indices: Arc<RwLock<HashSet<usize>>>,
    reject_indices: Arc<RwLock<HashSet<usize>>>,
    next_error: Arc<RwLock<Option<PublishError>>>,
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            publishes: Arc::new(RwLock::new(Vec::new())),
            carousels: Arc::new(RwLock::new(Vec::new())),
            fail_indices: Arc::new(RwLock::new(HashSet::new())),
            reject_indices: Arc::new(RwLock::new(HashSet::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Make the Nth publish calls (0-based, by arrival order) error.
    pub async fn set_fail_indices(&self, indices: Vec<usize>) {
        *self.fail_indices.write().await = indices.into_iter().collect();
    }

    /// Make the Nth publish calls return `Ok(false)`.
    pub async fn set_reject_indices(&self, indices: Vec<usize>) {
        *self.reject_indices.write().await = indices.into_iter().collect();
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: PublishError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn recorded_publishes(&self) -> Vec<RecordedPublish> {
        self.publishes.read().await.clone()
    }

    pub async fn recorded_carousels(&self) -> Vec<(Vec<PathBuf>, String)> {
        self.carousels.read().await.clone()
    }

    pub async fn publish_count(&self) -> usize {
        self.publishes.read().await.len()
    }

    pub async fn published_count(&self) -> usize {
        self.publishes
            .read()
            .await
            .iter()
            .filter(|p| p.result == Some(true))
            .count()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn publish(&self, image: &Path, caption: &str) -> Result<bool, PublishError> {
        let index = self.publishes.read().await.len();

        let result = if self.next_error.write().await.take().is_some()
            || self.fail_indices.read().await.contains(&index)
        {
            None
        } else if self.reject_indices.read().await.contains(&index) {
            Some(false)
        } else {
            Some(true)
        };

        self.publishes.write().await.push(RecordedPublish {
            path: image.to_path_buf(),
            caption: caption.to_string(),
            result,
        });

        match result {
            None => Err(PublishError::Http("simulated publish failure".to_string())),
            Some(ok) => Ok(ok),
        }
    }

    async fn publish_carousel(
        &self,
        images: &[PathBuf],
        caption: &str,
    ) -> Result<bool, PublishError> {
        if images.len() < 2 || images.len() > 10 {
            return Err(PublishError::InvalidCarousel(format!(
                "carousel requires 2 to 10 images, got {}",
                images.len()
            )));
        }
        if self.next_error.write().await.take().is_some() {
            return Err(PublishError::Http("simulated carousel failure".to_string()));
        }
        self.carousels
            .write()
            .await
            .push((images.to_vec(), caption.to_string()));
        Ok(true)
    }
}
