//! Health check endpoint

use axum::Json;

use crate::dto::HealthResponse;

/// GET /health - Check gateway health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
