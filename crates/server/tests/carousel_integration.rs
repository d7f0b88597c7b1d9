//! Integration tests for the carousel publishing API.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestFixture;

#[tokio::test]
async fn test_publish_carousel() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/carousel",
            json!({
                "images": ["posts/Arrays_slide_1.png", "posts/Arrays_slide_2.png"],
                "caption": "Arrays - full carousel #DSA"
            }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["published"], true);
    assert_eq!(response.body["images"], 2);

    let carousels = fixture.publisher.recorded_carousels().await;
    assert_eq!(carousels.len(), 1);
    let (images, caption) = &carousels[0];
    assert_eq!(images.len(), 2);
    assert_eq!(caption, "Arrays - full carousel #DSA");
}

#[tokio::test]
async fn test_carousel_rejects_single_image() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/carousel",
            json!({"images": ["posts/Arrays_slide_1.png"], "caption": "too few"}),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(fixture.publisher.recorded_carousels().await.is_empty());
}

#[tokio::test]
async fn test_carousel_rejects_more_than_ten_images() {
    let fixture = TestFixture::new();

    let images: Vec<String> = (1..=11).map(|i| format!("posts/slide_{}.png", i)).collect();
    let response = fixture
        .post("/api/v1/carousel", json!({"images": images, "caption": ""}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_carousel_without_publisher_unavailable() {
    let fixture = TestFixture::without_dispatcher();

    let response = fixture
        .post(
            "/api/v1/carousel",
            json!({"images": ["a.png", "b.png"], "caption": ""}),
        )
        .await;

    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);
}
