//! Route definitions for the Kisan Setu weather service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
///
/// Mounted both at the root and under `/api`, the prefix the mobile client
/// uses. A known path hit with the wrong method answers like an unknown
/// route instead of an empty 405.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::route_not_found),
        )
        // Weather and farming advice
        .nest("/weather", weather_routes())
}

/// Weather routes (public)
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/coordinates",
            get(handlers::get_weather_by_coordinates).fallback(handlers::route_not_found),
        )
        .route(
            "/city",
            get(handlers::get_weather_by_city).fallback(handlers::route_not_found),
        )
        .route(
            "/history",
            get(handlers::get_weather_history).fallback(handlers::route_not_found),
        )
}
