//! Integration tests for the topic queue API.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestFixture;

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_redacts_secrets() {
    let fixture = TestFixture::with_config_toml(
        r#"
[generator]
api_key = "sk-super-secret"

[publisher]
business_id = "12345"
access_token = "tok-super-secret"
public_base_url = "https://cdn.example/posts"
"#,
    );

    let response = fixture.get("/api/v1/config").await;
    assert_status!(response, StatusCode::OK);

    let raw = serde_json::to_string(&response.body).unwrap();
    assert!(!raw.contains("sk-super-secret"));
    assert!(!raw.contains("tok-super-secret"));
    assert_eq!(response.body["publisher"]["business_id"], "12345");
    assert_eq!(response.body["generator"]["api_key"], "***");
}

#[tokio::test]
async fn test_metrics_endpoint_prometheus_format() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/topics", json!({"name": "Arrays"}))
        .await;

    let (status, body) = fixture.get_text("/api/v1/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("# HELP"));
    assert!(body.contains("postino_topics_by_status"));
}

#[tokio::test]
async fn test_create_topic() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/topics",
            json!({"name": "Binary Search", "category": "DSA", "note": "from backlog"}),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["name"], "Binary Search");
    assert_eq!(response.body["status"], "pending");
    assert_eq!(response.body["category"], "DSA");
    assert_eq!(response.body["note"], "from backlog");
    assert_eq!(response.body["times_completed"], 0);
    assert!(response.body["id"].is_i64());
}

#[tokio::test]
async fn test_create_topic_defaults_category() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/topics", json!({"name": "Graphs"}))
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["category"], "Other");
}

#[tokio::test]
async fn test_create_duplicate_returns_existing() {
    let fixture = TestFixture::new();

    let first = fixture
        .post("/api/v1/topics", json!({"name": "Heaps", "category": "DSA"}))
        .await;
    assert_status!(first, StatusCode::CREATED);
    let id = first.body["id"].clone();

    // Re-adding is idempotent: same id, 200 instead of 201
    let second = fixture
        .post("/api/v1/topics", json!({"name": "Heaps"}))
        .await;
    assert_status!(second, StatusCode::OK);
    assert_eq!(second.body["id"], id);
    assert_eq!(second.body["category"], "DSA");
}

#[tokio::test]
async fn test_create_topic_empty_name_rejected() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/topics", json!({"name": "   "}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_create_topic_malformed_json() {
    let fixture = TestFixture::new();

    let response = fixture.post_raw("/api/v1/topics", "{not json").await;
    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_list_topics() {
    let fixture = TestFixture::new();

    for name in ["Arrays", "Stacks", "Queues"] {
        fixture.post("/api/v1/topics", json!({"name": name})).await;
    }

    let response = fixture.get("/api/v1/topics").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["topics"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_topic_not_found() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/topics/Nope").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_topic() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/topics", json!({"name": "Tries"}))
        .await;

    let response = fixture.delete("/api/v1/topics/Tries").await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = fixture.get("/api/v1/topics/Tries").await;
    assert_status!(response, StatusCode::NOT_FOUND);

    // Deleting again is a 404
    let response = fixture.delete("/api/v1/topics/Tries").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_complete_topic_stamps_completion() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/topics", json!({"name": "Sorting"}))
        .await;

    let response = fixture.post_empty("/api/v1/topics/Sorting/complete").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "done");
    assert_eq!(response.body["times_completed"], 1);
    assert!(response.body["last_completed_at"].is_string());

    // Completing again keeps counting
    let response = fixture.post_empty("/api/v1/topics/Sorting/complete").await;
    assert_eq!(response.body["times_completed"], 2);
}

#[tokio::test]
async fn test_complete_unknown_topic() {
    let fixture = TestFixture::new();

    let response = fixture.post_empty("/api/v1/topics/Nope/complete").await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_status_revives_failed_topic() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/topics", json!({"name": "Hashing"}))
        .await;

    let response = fixture
        .post(
            "/api/v1/topics/Hashing/status",
            json!({"status": "failed", "note": "render host down"}),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "failed");
    assert_eq!(response.body["note"], "render host down");

    // Failed topics are only revived through an explicit status change
    let response = fixture
        .post("/api/v1/topics/Hashing/status", json!({"status": "pending"}))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "pending");
    // Note survives when the transition does not carry one
    assert_eq!(response.body["note"], "render host down");
}

#[tokio::test]
async fn test_set_status_invalid_value() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/topics", json!({"name": "Hashing"}))
        .await;

    let response = fixture
        .post(
            "/api/v1/topics/Hashing/status",
            json!({"status": "sideways"}),
        )
        .await;
    assert!(response.status.is_client_error());
}

#[tokio::test]
async fn test_set_category() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/topics", json!({"name": "Recursion"}))
        .await;

    let response = fixture
        .post(
            "/api/v1/topics/Recursion/category",
            json!({"category": "Fundamentals"}),
        )
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["category"], "Fundamentals");
}

#[tokio::test]
async fn test_set_category_empty_rejected() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/topics", json!({"name": "Recursion"}))
        .await;

    let response = fixture
        .post("/api/v1/topics/Recursion/category", json!({"category": " "}))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
}
