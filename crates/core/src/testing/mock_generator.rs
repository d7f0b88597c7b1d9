//! Mock slide generator for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::generator::{
    GenerationError, GenerationRequest, Slide, SlideBody, SlideGenerator,
};

/// Mock implementation of the SlideGenerator trait.
///
/// Returns two canned slides by default; the slide list and the next
/// error are scriptable, and every request is recorded for assertions.
pub struct MockGenerator {
    slides: Arc<RwLock<Vec<Slide>>>,
    requests: Arc<RwLock<Vec<GenerationRequest>>>,
    next_error: Arc<RwLock<Option<GenerationError>>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerator {
    pub fn new() -> Self {
        let slides = vec![
            Slide {
                heading: "What & Why".to_string(),
                body: SlideBody::PlainText("Mock slide body 1".to_string()),
            },
            Slide {
                heading: "Interview Questions".to_string(),
                body: SlideBody::PlainText("Mock slide body 2".to_string()),
            },
        ];
        Self {
            slides: Arc::new(RwLock::new(slides)),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the slides returned by subsequent calls.
    pub async fn set_slides(&self, slides: Vec<Slide>) {
        *self.slides.write().await = slides;
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: GenerationError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<GenerationRequest> {
        self.requests.read().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl SlideGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Slide>, GenerationError> {
        self.requests.write().await.push(request.clone());
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        Ok(self.slides.read().await.clone())
    }
}
