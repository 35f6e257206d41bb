//! Handlers for unmatched routes and panicking requests

use axum::{
    extract::OriginalUri,
    http::Method,
    response::{IntoResponse, Response},
};
use std::any::Any;

use crate::error::AppError;

/// Fallback for routes that match nothing
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Turn a handler panic into the standard JSON error body
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    AppError::Internal(message).into_response()
}
