use axum::{response::IntoResponse, Json};
use chrono::Utc;
use serde::Serialize;

use crate::utils::error::AppError;

pub mod auth;
pub mod events;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    timestamp: String,
}

/// Liveness probe. Not wrapped in the response envelope.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthPayload {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
