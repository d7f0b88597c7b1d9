//! Carousel publishing API handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use postino_core::publisher::PublishError;

use crate::api::topics::ErrorResponse;
use crate::state::AppState;

/// Request body for publishing a carousel
#[derive(Debug, Deserialize)]
pub struct CarouselBody {
    /// 2 to 10 image paths, published in order
    pub images: Vec<String>,
    #[serde(default)]
    pub caption: String,
}

/// Response for a carousel publish
#[derive(Debug, Serialize)]
pub struct CarouselResponse {
    /// Whether the platform accepted the post
    pub published: bool,
    /// Number of images in the carousel
    pub images: usize,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn publish_error(e: PublishError) -> ApiError {
    let status = match e {
        PublishError::InvalidCarousel(_) => StatusCode::BAD_REQUEST,
        PublishError::ImageNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Publish a set of already-rendered images as one carousel post.
pub async fn post_carousel(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CarouselBody>,
) -> Result<Json<CarouselResponse>, ApiError> {
    let publisher = state.publisher().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "publisher not configured".to_string(),
        }),
    ))?;

    let images: Vec<PathBuf> = body.images.iter().map(PathBuf::from).collect();

    let published = publisher
        .publish_carousel(&images, &body.caption)
        .await
        .map_err(publish_error)?;

    Ok(Json(CarouselResponse {
        published,
        images: images.len(),
    }))
}
