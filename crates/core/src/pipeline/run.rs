//! Pipeline orchestration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::types::{PublishOutcome, PublishReport};
use crate::generator::{CarouselKind, GenerationRequest, SlideGenerator};
use crate::metrics;
use crate::publisher::Publisher;
use crate::renderer::{SlideRenderer, Theme};
use crate::sourcing::ImageSourcer;
use crate::topic::Topic;
use crate::util::sanitize_filename;

const SLIDE_LABELS: [&str; 3] = [
    "Introduction & Overview",
    "Syntax & Implementation",
    "Interview Questions",
];

/// Orchestrates one topic through generate, render, source and publish.
///
/// Phases 1-2 are fatal on failure; sourcing is best-effort; publishing
/// isolates per-artifact failures so one bad image never blocks the rest.
pub struct PostPipeline {
    generator: Arc<dyn SlideGenerator>,
    renderer: Arc<dyn SlideRenderer>,
    sourcer: Arc<dyn ImageSourcer>,
    publisher: Arc<dyn Publisher>,
    config: PipelineConfig,
}

impl PostPipeline {
    pub fn new(
        generator: Arc<dyn SlideGenerator>,
        renderer: Arc<dyn SlideRenderer>,
        sourcer: Arc<dyn ImageSourcer>,
        publisher: Arc<dyn Publisher>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            renderer,
            sourcer,
            publisher,
            config,
        }
    }

    /// Run the full pipeline for one claimed topic.
    pub async fn run(&self, topic: &Topic) -> Result<PublishReport, PipelineError> {
        let start = Instant::now();
        let result = self.run_inner(topic).await;

        let label = match &result {
            Ok(report) if report.is_success() => "success",
            Ok(_) => "partial_failure",
            Err(_) => "failed",
        };
        metrics::PIPELINE_RUNS.with_label_values(&[label]).inc();
        metrics::PIPELINE_DURATION
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    async fn run_inner(&self, topic: &Topic) -> Result<PublishReport, PipelineError> {
        let kind = CarouselKind::for_topic(&topic.name, &topic.category);
        let theme = Theme::for_kind(kind);
        info!(
            "Pipeline start for topic {} ({:?}, theme {})",
            topic.name, kind, theme
        );

        // Phase 1: generate slide text
        let request = GenerationRequest::new(topic.name.clone(), kind);
        let slides = self.generator.generate(&request).await?;

        // Phase 2: render; failed slides are skipped, not fatal
        let render_results = self
            .renderer
            .render(topic.id, &topic.name, &slides, theme)
            .await;

        let mut artifacts = Vec::new();
        for (i, result) in render_results.into_iter().enumerate() {
            match result {
                Ok(artifact) => {
                    metrics::SLIDES_RENDERED.with_label_values(&["success"]).inc();
                    artifacts.push(artifact);
                }
                Err(e) => {
                    metrics::SLIDES_RENDERED.with_label_values(&["failed"]).inc();
                    warn!("Slide {} of {} failed to render: {}", i + 1, topic.name, e);
                }
            }
        }
        if artifacts.is_empty() {
            return Err(PipelineError::NothingRendered);
        }

        // Phase 3: source reference images, best-effort
        let sourced = match self
            .sourcer
            .source_images(&topic.name, self.config.sourced_images)
            .await
        {
            Ok(images) => images,
            Err(e) => {
                warn!("Image sourcing failed for {}: {}", topic.name, e);
                Vec::new()
            }
        };
        metrics::IMAGES_SOURCED
            .with_label_values(&[])
            .observe(sourced.len() as f64);

        // Phase 4: assemble the post list with captions
        let tag = sanitize_filename(&topic.name);
        let mut posts: Vec<(PathBuf, String)> = Vec::new();
        for (i, artifact) in artifacts.iter().enumerate() {
            let caption = match SLIDE_LABELS.get(i) {
                Some(label) => format!(
                    "{} - {} #{} #{}",
                    topic.name, label, self.config.hashtag, tag
                ),
                None => format!("{} - Visual reference", topic.name),
            };
            posts.push((artifact.path.clone(), caption));
        }
        for (i, image) in sourced.iter().enumerate() {
            let caption = format!(
                "{} - Visual reference {} #{} #{}",
                topic.name,
                i + 1,
                self.config.hashtag,
                tag
            );
            posts.push((image.path.clone(), caption));
        }

        // Phase 5: publish each artifact independently
        let attempted = posts.len();
        let mut published = 0;
        for (i, (path, caption)) in posts.iter().enumerate() {
            match self.publisher.publish(path, caption).await {
                Ok(true) => {
                    metrics::PUBLISH_ATTEMPTS.with_label_values(&["published"]).inc();
                    published += 1;
                    info!("Published artifact {}/{} for {}", i + 1, attempted, topic.name);
                }
                Ok(false) => {
                    metrics::PUBLISH_ATTEMPTS.with_label_values(&["rejected"]).inc();
                    warn!(
                        "Platform rejected artifact {}/{} for {}",
                        i + 1,
                        attempted,
                        topic.name
                    );
                }
                Err(e) => {
                    metrics::PUBLISH_ATTEMPTS.with_label_values(&["error"]).inc();
                    error!(
                        "Failed to publish artifact {}/{} for {}: {}",
                        i + 1,
                        attempted,
                        topic.name,
                        e
                    );
                }
            }
        }

        let outcome = if published == attempted {
            PublishOutcome::Success
        } else {
            PublishOutcome::PartialFailure
        };
        info!(
            "Pipeline finished for {}: {}/{} published",
            topic.name, published, attempted
        );

        Ok(PublishReport {
            outcome,
            published,
            attempted,
        })
    }
}
