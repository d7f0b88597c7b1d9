//! Mock slide renderer for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::generator::Slide;
use crate::renderer::{Artifact, RenderError, SlideRenderer, Theme};
use crate::util::sanitize_filename;

/// A recorded render call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedRender {
    pub topic_name: String,
    pub slide_count: usize,
    pub theme: Theme,
}

/// Mock implementation of the SlideRenderer trait.
///
/// Fabricates artifact paths without touching the filesystem. Individual
/// slide indices or the whole batch can be made to fail.
pub struct MockRenderer {
    renders: Arc<RwLock<Vec<RecordedRender>>>,
    fail_indices: Arc<RwLock<HashSet<usize>>>,
    fail_all: Arc<RwLock<bool>>,
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(RwLock::new(Vec::new())),
            fail_indices: Arc::new(RwLock::new(HashSet::new())),
            fail_all: Arc::new(RwLock::new(false)),
        }
    }

    /// Make the given slide indices fail on every subsequent call.
    pub async fn set_fail_indices(&self, indices: Vec<usize>) {
        *self.fail_indices.write().await = indices.into_iter().collect();
    }

    /// Make every slide fail.
    pub async fn set_fail_all(&self, fail: bool) {
        *self.fail_all.write().await = fail;
    }

    pub async fn recorded_renders(&self) -> Vec<RecordedRender> {
        self.renders.read().await.clone()
    }

    pub async fn render_count(&self) -> usize {
        self.renders.read().await.len()
    }
}

#[async_trait]
impl SlideRenderer for MockRenderer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn render(
        &self,
        _topic_id: i64,
        topic_name: &str,
        slides: &[Slide],
        theme: Theme,
    ) -> Vec<Result<Artifact, RenderError>> {
        self.renders.write().await.push(RecordedRender {
            topic_name: topic_name.to_string(),
            slide_count: slides.len(),
            theme,
        });

        let fail_all = *self.fail_all.read().await;
        let fail_indices = self.fail_indices.read().await.clone();
        let safe = sanitize_filename(topic_name);

        slides
            .iter()
            .enumerate()
            .map(|(i, _)| {
                if fail_all || fail_indices.contains(&i) {
                    Err(RenderError::render_failed("simulated render failure", None))
                } else {
                    Ok(Artifact {
                        path: PathBuf::from(format!("/mock/{}_slide_{}.png", safe, i + 1)),
                        slide_index: i,
                    })
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SlideBody;

    fn slides(n: usize) -> Vec<Slide> {
        (0..n)
            .map(|i| Slide {
                heading: format!("Slide {}", i + 1),
                body: SlideBody::PlainText("body".to_string()),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_renders_all_by_default() {
        let renderer = MockRenderer::new();
        let results = renderer.render(1, "Arrays", &slides(3), Theme::Blue).await;
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(renderer.render_count().await, 1);
    }

    #[tokio::test]
    async fn test_fail_indices() {
        let renderer = MockRenderer::new();
        renderer.set_fail_indices(vec![1]).await;
        let results = renderer.render(1, "Arrays", &slides(3), Theme::Blue).await;
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
