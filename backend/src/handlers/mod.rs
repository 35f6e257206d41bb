//! HTTP request handlers

pub mod fallback;
pub mod health;
pub mod weather;

pub use fallback::{handle_panic, route_not_found};
pub use health::health_check;
pub use weather::{get_weather_by_city, get_weather_by_coordinates, get_weather_history};
