//! Topic queue API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use postino_core::topic::{Topic, TopicError, TopicStatus};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for adding a topic
#[derive(Debug, Deserialize)]
pub struct CreateTopicBody {
    /// Unique topic name
    pub name: String,
    /// Category (defaults to "Other")
    pub category: Option<String>,
    /// Optional annotation
    pub note: Option<String>,
}

/// Request body for setting a topic status
#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
    pub status: TopicStatus,
    pub note: Option<String>,
}

/// Request body for changing a topic category
#[derive(Debug, Deserialize)]
pub struct SetCategoryBody {
    pub category: String,
}

/// Response for topic operations
#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub id: i64,
    pub name: String,
    pub status: TopicStatus,
    pub created_at: String,
    pub last_completed_at: Option<String>,
    pub times_completed: u32,
    pub category: String,
    pub note: Option<String>,
}

impl From<Topic> for TopicResponse {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name,
            status: topic.status,
            created_at: topic.created_at.to_rfc3339(),
            last_completed_at: topic.last_completed_at.map(|t| t.to_rfc3339()),
            times_completed: topic.times_completed,
            category: topic.category,
            note: topic.note,
        }
    }
}

/// Response for listing topics
#[derive(Debug, Serialize)]
pub struct ListTopicsResponse {
    pub topics: Vec<TopicResponse>,
    pub total: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn store_error(e: TopicError) -> ApiError {
    let status = match e {
        TopicError::Validation(_) => StatusCode::BAD_REQUEST,
        TopicError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn not_found(name: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Topic not found: {}", name),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Add a topic to the queue.
///
/// Adding an existing name is not an error: the response carries the
/// existing row with status 200 instead of 201.
pub async fn create_topic(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTopicBody>,
) -> Result<(StatusCode, Json<TopicResponse>), ApiError> {
    let name = body.name.trim();
    let category = body.category.as_deref().unwrap_or("Other");

    if let Some(existing) = state.store().get_by_name(name).map_err(store_error)? {
        return Ok((StatusCode::OK, Json(TopicResponse::from(existing))));
    }

    let id = state
        .store()
        .add(name, category, body.note.as_deref())
        .map_err(store_error)?;

    match state.store().get_by_id(id).map_err(store_error)? {
        Some(topic) => Ok((StatusCode::CREATED, Json(TopicResponse::from(topic)))),
        None => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Topic vanished after insert: {}", id),
            }),
        )),
    }
}

/// List every topic, newest first.
pub async fn list_topics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListTopicsResponse>, ApiError> {
    let topics = state.store().list_all().map_err(store_error)?;
    let total = topics.len();

    Ok(Json(ListTopicsResponse {
        topics: topics.into_iter().map(TopicResponse::from).collect(),
        total,
    }))
}

/// Get a topic by name.
pub async fn get_topic(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TopicResponse>, ApiError> {
    match state.store().get_by_name(&name).map_err(store_error)? {
        Some(topic) => Ok(Json(TopicResponse::from(topic))),
        None => Err(not_found(&name)),
    }
}

/// Remove a topic.
pub async fn delete_topic(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store().delete(&name).map_err(store_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&name))
    }
}

/// Mark a topic done, stamping the completion time and counter.
pub async fn complete_topic(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<TopicResponse>, ApiError> {
    if state
        .store()
        .get_by_name(&name)
        .map_err(store_error)?
        .is_none()
    {
        return Err(not_found(&name));
    }

    state.store().mark_done(&name).map_err(store_error)?;

    match state.store().get_by_name(&name).map_err(store_error)? {
        Some(topic) => Ok(Json(TopicResponse::from(topic))),
        None => Err(not_found(&name)),
    }
}

/// Set a topic's status directly (administrative; e.g. reviving a failed
/// topic back to pending).
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<SetStatusBody>,
) -> Result<Json<TopicResponse>, ApiError> {
    if state
        .store()
        .get_by_name(&name)
        .map_err(store_error)?
        .is_none()
    {
        return Err(not_found(&name));
    }

    state
        .store()
        .mark_status(&name, body.status, body.note.as_deref())
        .map_err(store_error)?;

    match state.store().get_by_name(&name).map_err(store_error)? {
        Some(topic) => Ok(Json(TopicResponse::from(topic))),
        None => Err(not_found(&name)),
    }
}

/// Change a topic's category.
pub async fn set_category(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<SetCategoryBody>,
) -> Result<Json<TopicResponse>, ApiError> {
    let category = body.category.trim();
    if category.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "category cannot be empty".to_string(),
            }),
        ));
    }

    if state
        .store()
        .get_by_name(&name)
        .map_err(store_error)?
        .is_none()
    {
        return Err(not_found(&name));
    }

    state
        .store()
        .update_category(&name, category)
        .map_err(store_error)?;

    match state.store().get_by_name(&name).map_err(store_error)? {
        Some(topic) => Ok(Json(TopicResponse::from(topic))),
        None => Err(not_found(&name)),
    }
}
