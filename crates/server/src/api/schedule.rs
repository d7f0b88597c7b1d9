//! Scheduling API handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::topics::ErrorResponse;
use crate::state::AppState;

/// Request body for a dispatch cycle
#[derive(Debug, Deserialize)]
pub struct ScheduleBody {
    /// Maximum topics to claim this cycle
    pub count: Option<usize>,
}

/// Response for a dispatch cycle
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    /// Topics claimed and submitted to the worker pool
    pub claimed: usize,
}

/// Response for a stuck-topic reset
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// Topics transitioned from in_progress back to pending
    pub reset: usize,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Claim up to `count` pending topics and run the pipeline for each.
///
/// Fire-and-forget: responds as soon as the topics are submitted to the
/// pool, long before the pipeline runs finish.
pub async fn schedule(
    State(state): State<Arc<AppState>>,
    body: Option<Json<ScheduleBody>>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let count = body.and_then(|b| b.count).unwrap_or(1);

    let dispatcher = state.dispatcher().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "dispatcher not configured (missing collaborator config)".to_string(),
        }),
    ))?;

    match dispatcher.dispatch(count) {
        Ok(claimed) => Ok(Json(ScheduleResponse { claimed })),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// Reset topics stranded in `in_progress` back to `pending`.
///
/// Works without a dispatcher so crash recovery stays available even when
/// no collaborators are configured.
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<ResetResponse>, ApiError> {
    let result = match state.dispatcher() {
        Some(dispatcher) => dispatcher.reset_stuck().map_err(|e| e.to_string()),
        None => state.store().reset_stuck().map_err(|e| e.to_string()),
    };

    match result {
        Ok(reset) => Ok(Json(ResetResponse { reset })),
        Err(error) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error }),
        )),
    }
}
