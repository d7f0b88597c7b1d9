//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the postino server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Topic queue depth by status (collected dynamically)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};

use postino_core::topic::TopicStatus;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "postino_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("postino_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "postino_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Topic Queue Metrics (collected dynamically)
// =============================================================================

/// Topics by current status (collected dynamically).
pub static TOPICS_BY_STATUS: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("postino_topics_by_status", "Current topic count by status"),
        &["status"],
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
    registry
        .register(Box::new(TOPICS_BY_STATUS.clone()))
        .unwrap();

    // Core metrics (dispatcher, pipeline, publisher)
    for metric in postino_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding metrics to update the queue-depth gauges with
/// current values from the topic store.
pub fn collect_dynamic_metrics(state: &crate::state::AppState) {
    let topics = match state.store().list_all() {
        Ok(topics) => topics,
        Err(_) => return,
    };

    for status in [
        TopicStatus::Pending,
        TopicStatus::InProgress,
        TopicStatus::Done,
        TopicStatus::Failed,
    ] {
        let count = topics.iter().filter(|t| t.status == status).count();
        TOPICS_BY_STATUS
            .with_label_values(&[status.as_str()])
            .set(count as i64);
    }
}

/// Normalize a path for metric labels (replace topic names and IDs with
/// placeholders so label cardinality stays bounded).
pub fn normalize_path(path: &str) -> String {
    let name_regex = regex_lite::Regex::new(r"(/topics/)[^/]+").unwrap();
    let numeric_regex = regex_lite::Regex::new(r"/\d+(/|$)").unwrap();

    let result = name_regex.replace_all(path, "${1}{name}");
    let result = numeric_regex.replace_all(&result, "/{id}$1");
    result.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_topic_name() {
        let path = "/api/v1/topics/Binary%20Search";
        assert_eq!(normalize_path(path), "/api/v1/topics/{name}");
    }

    #[test]
    fn test_normalize_path_topic_subresource() {
        let path = "/api/v1/topics/Arrays/complete";
        assert_eq!(normalize_path(path), "/api/v1/topics/{name}/complete");
    }

    #[test]
    fn test_normalize_path_numeric() {
        let path = "/api/v1/things/12345";
        assert_eq!(normalize_path(path), "/api/v1/things/{id}");
    }

    #[test]
    fn test_normalize_path_no_ids() {
        let path = "/api/v1/health";
        assert_eq!(normalize_path(path), "/api/v1/health");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        // Access metrics to ensure they're initialized
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("postino_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_queue_metrics() {
        // Prometheus only outputs metrics that have been accessed
        HTTP_REQUEST_DURATION
            .with_label_values(&["GET", "/test", "200"])
            .observe(0.1);
        HTTP_REQUESTS_IN_FLIGHT.set(0);
        TOPICS_BY_STATUS.with_label_values(&["pending"]).set(0);

        let output = encode_metrics();
        assert!(output.contains("postino_http_request_duration_seconds"));
        assert!(output.contains("postino_http_requests_in_flight"));
        assert!(output.contains("postino_topics_by_status"));
    }
}
