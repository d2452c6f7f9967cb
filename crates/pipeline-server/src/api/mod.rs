//! API module for the Pipeline Server
//!
//! This module contains the API routes and handlers for the Pipeline Server.

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod errors;
pub mod health;
pub mod pipelines;

use crate::server::PipelineServer;
use errors::ApiError;

/// Build the router for API endpoints
pub fn build_router(server: Arc<PipelineServer>) -> Router {
    let cors = server.cors_layer();
    let body_limit = DefaultBodyLimit::max(server.config.max_body_bytes);

    Router::new()
        // Liveness
        .route("/", get(health::ping))

        // Pipeline analysis
        .route("/pipelines/parse", post(pipelines::parse_pipeline))

        .fallback(not_found)

        // Middleware
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)

        // Shared state
        .with_state(server)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
