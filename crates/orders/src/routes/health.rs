//! Health check endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /v1/healthcheck — returns service availability.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "available",
    })
}
