//! Configuration management for the Kisan Setu weather service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with KISAN__ prefix
//! 4. The plain variables used by existing deployments
//!    (OPENWEATHER_API_KEY, DATABASE_URL, PORT)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream weather provider configuration
    pub weather: WeatherConfig,

    /// Optional record cache configuration
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; requests that need the provider fail without it
    pub api_key: Option<String>,

    /// Provider base URL, overridable for testing
    pub base_url: String,

    /// Per-request network timeout
    pub request_timeout_secs: u64,

    /// How long a cached record may be served
    pub freshness_window_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// PostgreSQL connection URL; caching is disabled when absent
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("KISAN_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let server = ServerConfig::default();
        let weather = WeatherConfig::default();
        let cache = CacheConfig::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", i64::from(server.port))?
            .set_default("server.host", server.host)?
            .set_default("weather.base_url", weather.base_url)?
            .set_default(
                "weather.request_timeout_secs",
                weather.request_timeout_secs as i64,
            )?
            .set_default(
                "weather.freshness_window_minutes",
                weather.freshness_window_minutes,
            )?
            .set_default("cache.max_connections", i64::from(cache.max_connections))?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (KISAN__ prefix)
            .add_source(
                Environment::with_prefix("KISAN")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("weather.api_key", non_empty_env("OPENWEATHER_API_KEY"))?
            .set_override_option("cache.url", non_empty_env("DATABASE_URL"))?
            .set_override_option("server.port", non_empty_env("PORT"))?
            .build()?;

        config.try_deserialize()
    }
}

impl WeatherConfig {
    /// API key, treating an empty string as not configured
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            request_timeout_secs: 10,
            freshness_window_minutes: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
