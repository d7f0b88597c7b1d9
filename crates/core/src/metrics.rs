//! Prometheus metrics for core components.
//!
//! Covers the dispatcher (claims, cycles), the pipeline (runs, phase
//! outcomes) and publish attempts.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Dispatcher Metrics
// =============================================================================

/// Topics claimed by dispatch cycles.
pub static TOPICS_CLAIMED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("postino_topics_claimed_total", "Total topics claimed").unwrap()
});

/// Dispatch cycles total by result.
pub static DISPATCH_CYCLES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("postino_dispatch_cycles_total", "Total dispatch cycles"),
        &["result"], // "claimed", "empty", "error"
    )
    .unwrap()
});

/// Stuck topics reset back to pending.
pub static TOPICS_RESET: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "postino_topics_reset_total",
        "Total in-progress topics reset to pending",
    )
    .unwrap()
});

// =============================================================================
// Pipeline Metrics
// =============================================================================

/// Pipeline runs total by result.
pub static PIPELINE_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("postino_pipeline_runs_total", "Total pipeline runs"),
        &["result"], // "success", "partial_failure", "failed"
    )
    .unwrap()
});

/// Pipeline run duration in seconds.
pub static PIPELINE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "postino_pipeline_duration_seconds",
            "Duration of pipeline runs",
        )
        .buckets(vec![1.0, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        &["result"],
    )
    .unwrap()
});

/// Slides rendered total by result.
pub static SLIDES_RENDERED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("postino_slides_rendered_total", "Total slides rendered"),
        &["result"], // "success", "failed"
    )
    .unwrap()
});

/// Images sourced per run.
pub static IMAGES_SOURCED: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "postino_images_sourced",
            "Number of reference images sourced per run",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 10.0]),
        &[],
    )
    .unwrap()
});

/// Publish attempts total by result.
pub static PUBLISH_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("postino_publish_attempts_total", "Total publish attempts"),
        &["result"], // "published", "rejected", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TOPICS_CLAIMED.clone()),
        Box::new(DISPATCH_CYCLES.clone()),
        Box::new(TOPICS_RESET.clone()),
        Box::new(PIPELINE_RUNS.clone()),
        Box::new(PIPELINE_DURATION.clone()),
        Box::new(SLIDES_RENDERED.clone()),
        Box::new(IMAGES_SOURCED.clone()),
        Box::new(PUBLISH_ATTEMPTS.clone()),
    ]
}
