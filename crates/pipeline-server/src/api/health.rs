//! Liveness endpoint for the Pipeline Server

use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

/// Liveness handler
///
/// Always answers `{"Ping": "Pong"}`.
pub async fn ping() -> Json<Value> {
    debug!("Ping requested");
    Json(json!({ "Ping": "Pong" }))
}
