//! Kisan Setu weather advisory service
//!
//! Proxies OpenWeatherMap for farmers, aggregates the 5-day forecast into
//! daily summaries, derives farming advice and keeps a best-effort cache of
//! the resulting records.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use services::WeatherService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherService>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root).fallback(handlers::route_not_found))
        .merge(routes::api_routes())
        .nest("/api", routes::api_routes())
        .fallback(handlers::route_not_found)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Kisan Setu Weather Advisory API v1.0"
}
