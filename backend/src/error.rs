//! Error handling for the Kisan Setu weather service
//!
//! Every failure is rendered as a JSON body with an `error` category and a
//! `message` detail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Route not found: {method} {path}")]
    RouteNotFound { method: String, path: String },

    // External service errors
    #[error("Upstream weather provider error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Cache store errors, only surfaced by the history query
    #[error("Weather history unavailable: {0}")]
    History(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    /// HTTP status and response body for this error
    pub fn parts(&self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid request".to_string(),
                    message: msg.clone(),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: format!("{} not found", resource),
                    message: format!("No matching {} was found", resource.to_lowercase()),
                },
            ),
            AppError::RouteNotFound { method, path } => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Route not found".to_string(),
                    message: format!("Cannot {} {}", method, path),
                },
            ),
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Failed to fetch weather data".to_string(),
                    message: msg.clone(),
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Configuration error".to_string(),
                    message: msg.clone(),
                },
            ),
            AppError::History(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Failed to fetch weather history".to_string(),
                    message: msg.clone(),
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Something went wrong!".to_string(),
                    message: msg.clone(),
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let (status, body) = AppError::Validation("City name is required".into()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "City name is required");
    }

    #[test]
    fn test_not_found_names_resource() {
        let (status, body) = AppError::NotFound("City".into()).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "City not found");
    }

    #[test]
    fn test_upstream_keeps_underlying_message() {
        let (status, body) = AppError::Upstream("Weather API error: 401".into()).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to fetch weather data");
        assert_eq!(body.message, "Weather API error: 401");
    }

    #[test]
    fn test_route_not_found_message() {
        let (status, body) = AppError::RouteNotFound {
            method: "GET".into(),
            path: "/nope".into(),
        }
        .parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Cannot GET /nope");
    }
}
