//! Health check handlers

use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Health check endpoint handler
///
/// Reports process liveness only; the cache is optional and never makes the
/// service unhealthy.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Kisan Setu Backend is running".to_string(),
        timestamp: Utc::now(),
    })
}
