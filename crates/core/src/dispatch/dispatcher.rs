//! The topic dispatcher.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use super::config::DispatcherConfig;
use super::error::DispatchError;
use crate::metrics;
use crate::pipeline::PostPipeline;
use crate::topic::{Topic, TopicStatus, TopicStore};

/// Claims pending topics and runs the pipeline for each on a bounded pool.
///
/// `dispatch` is fire-and-forget: it returns as soon as the claimed
/// topics are submitted. Workers reconcile terminal status back into the
/// store when their pipeline run finishes.
pub struct TopicDispatcher {
    store: Arc<dyn TopicStore>,
    pipeline: Arc<PostPipeline>,
    permits: Arc<Semaphore>,
}

impl TopicDispatcher {
    pub fn new(
        store: Arc<dyn TopicStore>,
        pipeline: Arc<PostPipeline>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            store,
            pipeline,
            permits: Arc::new(Semaphore::new(config.pool_size.max(1))),
        }
    }

    /// Claim up to `count` pending topics and submit them to the pool.
    ///
    /// Returns the number of topics claimed, immediately after submission.
    /// A claim-time store error aborts the cycle; nothing is lost because
    /// the claim transaction did not commit.
    pub fn dispatch(&self, count: usize) -> Result<usize, DispatchError> {
        let claimed = match self.store.claim_next(count) {
            Ok(topics) => topics,
            Err(e) => {
                metrics::DISPATCH_CYCLES.with_label_values(&["error"]).inc();
                return Err(e.into());
            }
        };

        if claimed.is_empty() {
            metrics::DISPATCH_CYCLES.with_label_values(&["empty"]).inc();
            info!("No pending topics to dispatch");
            return Ok(0);
        }

        metrics::DISPATCH_CYCLES.with_label_values(&["claimed"]).inc();
        metrics::TOPICS_CLAIMED.inc_by(claimed.len() as u64);
        info!("Dispatching {} topics", claimed.len());

        let submitted = claimed.len();
        for topic in claimed {
            let store = Arc::clone(&self.store);
            let pipeline = Arc::clone(&self.pipeline);
            let permits = Arc::clone(&self.permits);

            tokio::spawn(async move {
                // Pool size bounds concurrency, not batch size
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return, // semaphore closed, shutting down
                };
                run_one(store, pipeline, topic).await;
            });
        }

        Ok(submitted)
    }

    /// Recover topics stranded in `in_progress` (e.g. after a crash).
    /// Failed topics are left alone.
    pub fn reset_stuck(&self) -> Result<usize, DispatchError> {
        let reset = self.store.reset_stuck()?;
        metrics::TOPICS_RESET.inc_by(reset as u64);
        Ok(reset)
    }
}

async fn run_one(store: Arc<dyn TopicStore>, pipeline: Arc<PostPipeline>, topic: Topic) {
    let name = topic.name.clone();

    let outcome = match pipeline.run(&topic).await {
        Ok(report) if report.is_success() => store.mark_done(&name),
        Ok(report) => {
            let note = format!(
                "published {}/{} artifacts",
                report.published, report.attempted
            );
            warn!("Topic {} partially failed: {}", name, note);
            store.mark_status(&name, TopicStatus::Failed, Some(&note))
        }
        Err(e) => {
            let note = e.to_string();
            warn!("Topic {} failed: {}", name, note);
            store.mark_status(&name, TopicStatus::Failed, Some(&note))
        }
    };

    if let Err(e) = outcome {
        error!("Failed to record terminal status for {}: {}", name, e);
    }
}
