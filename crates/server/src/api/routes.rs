use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{carousel, handlers, middleware::metrics_middleware, schedule, topics};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health, config, metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        // Topic queue
        .route("/topics", post(topics::create_topic))
        .route("/topics", get(topics::list_topics))
        .route("/topics/{name}", get(topics::get_topic))
        .route("/topics/{name}", delete(topics::delete_topic))
        .route("/topics/{name}/complete", post(topics::complete_topic))
        .route("/topics/{name}/status", post(topics::set_status))
        .route("/topics/{name}/category", post(topics::set_category))
        // Publishing
        .route("/carousel", post(carousel::post_carousel))
        // Scheduling
        .route("/schedule", post(schedule::schedule))
        .route("/schedule/reset", post(schedule::reset))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
