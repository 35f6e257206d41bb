//! Business logic services for the Kisan Setu weather service

pub mod cache;
pub mod weather;

pub use cache::{CacheError, CacheKey, CacheStore, DisabledCacheStore, PgCacheStore};
pub use weather::WeatherService;
