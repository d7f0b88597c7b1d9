//! Common test utilities for in-process API testing with mocks.
//!
//! The fixture builds the real router against an in-memory topic store and
//! mock collaborators, so tests exercise the full HTTP surface without
//! external infrastructure.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use postino_core::config::load_config_from_str;
use postino_core::dispatch::{DispatcherConfig, TopicDispatcher};
use postino_core::generator::SlideGenerator;
use postino_core::pipeline::{PipelineConfig, PostPipeline};
use postino_core::publisher::Publisher;
use postino_core::testing::{MockGenerator, MockPublisher, MockRenderer, MockSourcer};
use postino_core::topic::{SqliteTopicStore, TopicStore};

use postino_server::api::create_router;
use postino_server::state::AppState;

/// Test fixture for API testing with mock collaborators.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Direct handle on the store backing the router
    pub store: Arc<SqliteTopicStore>,
    /// Mock generator - inject slides or errors
    pub generator: Arc<MockGenerator>,
    /// Mock publisher - inject per-artifact failures
    pub publisher: Arc<MockPublisher>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with default (empty) configuration.
    pub fn new() -> Self {
        Self::with_config_toml("")
    }

    /// Create a fixture with no publisher or dispatcher, as when
    /// collaborator config sections are missing. The queue API must
    /// still work.
    pub fn without_dispatcher() -> Self {
        let mut fixture = Self::new();
        let state = Arc::new(AppState::new(
            load_config_from_str("").expect("invalid test config"),
            Arc::clone(&fixture.store) as Arc<dyn TopicStore>,
            None,
            None,
        ));
        fixture.router = create_router(state);
        fixture
    }

    /// Create a fixture from a TOML config string.
    pub fn with_config_toml(toml: &str) -> Self {
        let config = load_config_from_str(toml).expect("invalid test config");

        let store = Arc::new(SqliteTopicStore::in_memory().expect("in-memory store"));
        let generator = Arc::new(MockGenerator::new());
        let publisher = Arc::new(MockPublisher::new());

        let pipeline = Arc::new(PostPipeline::new(
            Arc::clone(&generator) as Arc<dyn SlideGenerator>,
            Arc::new(MockRenderer::new()),
            Arc::new(MockSourcer::new()),
            Arc::clone(&publisher) as Arc<dyn Publisher>,
            PipelineConfig::default(),
        ));

        let dispatcher = Arc::new(TopicDispatcher::new(
            Arc::clone(&store) as Arc<dyn TopicStore>,
            pipeline,
            DispatcherConfig::default(),
        ));

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&store) as Arc<dyn TopicStore>,
            Some(Arc::clone(&publisher) as Arc<dyn Publisher>),
            Some(dispatcher),
        ));

        Self {
            router: create_router(state),
            store,
            generator,
            publisher,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with no body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a GET request and return the raw body (for non-JSON endpoints).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&body_bytes).to_string())
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Poll a topic until it reaches the given status string.
pub async fn wait_for_topic_status(fixture: &TestFixture, name: &str, status: &str) -> Value {
    for _ in 0..200 {
        let response = fixture.get(&format!("/api/v1/topics/{}", name)).await;
        if response.body["status"] == status {
            return response.body;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("topic {} never reached status {}", name, status);
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
