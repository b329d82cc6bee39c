use axum::{Json, http::StatusCode};

use crate::app::errors::json_error;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Uniform 404 for unknown routes.
pub async fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "Route not found")
}
