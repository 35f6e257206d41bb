//! Weather service: resolves a location, serves cached records and builds
//! fresh ones with forecast aggregation and farming advice

use chrono::{DateTime, Duration, Utc};
use shared::advisory::{generate_farming_advice, Observation};
use shared::forecast::aggregate_daily;
use shared::models::WeatherRecord;
use shared::types::Coordinates;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::external::weather::{CurrentObservation, ForecastFeed, WeatherClient};
use crate::services::cache::{CacheKey, CacheStore};

/// Weather service for building and caching weather records
pub struct WeatherService {
    weather_client: Option<WeatherClient>,
    cache: Arc<dyn CacheStore>,
    freshness_window: Duration,
}

impl WeatherService {
    /// Create a new WeatherService
    ///
    /// A missing API key is not an error here: cached records can still be
    /// served and history still works, only upstream fetches are refused.
    pub fn new(config: &WeatherConfig, cache: Arc<dyn CacheStore>) -> AppResult<Self> {
        let weather_client = match config.api_key() {
            Some(key) => Some(WeatherClient::new(
                key.to_string(),
                config.base_url.clone(),
                std::time::Duration::from_secs(config.request_timeout_secs),
            )?),
            None => {
                tracing::warn!("Weather API key not configured; upstream fetches are disabled");
                None
            }
        };

        Ok(Self {
            weather_client,
            cache,
            freshness_window: Duration::minutes(config.freshness_window_minutes),
        })
    }

    /// Weather for exact coordinates, from cache when fresh
    pub async fn by_coordinates(&self, coords: Coordinates) -> AppResult<WeatherRecord> {
        if let Some(record) = self.cached(&CacheKey::Coordinates(coords)).await {
            return Ok(record);
        }

        let client = self.client()?;
        self.fetch_and_store(client, coords).await
    }

    /// Weather for a city name
    ///
    /// A fresh record whose location name contains `city` is served without
    /// touching the provider. Otherwise the city is geocoded and the
    /// coordinate pipeline runs on the resolved position.
    pub async fn by_city(&self, city: &str) -> AppResult<WeatherRecord> {
        if let Some(record) = self.cached(&CacheKey::City(city.to_string())).await {
            return Ok(record);
        }

        let client = self.client()?;
        let place = client
            .geocode(city)
            .await?
            .ok_or_else(|| AppError::NotFound("City".to_string()))?;

        tracing::debug!(
            "Resolved '{}' to {}, {} ({}, {})",
            city,
            place.name,
            place.country,
            place.lat,
            place.lon
        );

        self.by_coordinates(Coordinates::new(place.lat, place.lon))
            .await
    }

    /// Stored records for coordinates from the last `days` days, newest first
    pub async fn history(&self, coords: Coordinates, days: i64) -> AppResult<Vec<WeatherRecord>> {
        let since = Utc::now() - Duration::days(days);
        self.cache
            .history(&coords, since)
            .await
            .map_err(|e| AppError::History(e.to_string()))
    }

    fn client(&self) -> AppResult<&WeatherClient> {
        self.weather_client
            .as_ref()
            .ok_or_else(|| AppError::Configuration("Weather API key not configured".to_string()))
    }

    fn fresh_since(&self) -> DateTime<Utc> {
        Utc::now() - self.freshness_window
    }

    /// Cache lookup that treats any store failure as a miss
    async fn cached(&self, key: &CacheKey) -> Option<WeatherRecord> {
        match self.cache.lookup(key, self.fresh_since()).await {
            Ok(Some(record)) => {
                tracing::debug!("Cache hit for {}", key);
                Some(record)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Cache lookup skipped for {}: {}", key, e);
                None
            }
        }
    }

    async fn fetch_and_store(
        &self,
        client: &WeatherClient,
        coords: Coordinates,
    ) -> AppResult<WeatherRecord> {
        tracing::info!("Fetching weather from provider for {}", coords);

        let (current, forecast) = tokio::try_join!(
            client.get_current_weather(coords),
            client.get_forecast(coords)
        )?;

        let record = build_record(current, forecast, Utc::now());

        if let Err(e) = self.cache.put(&coords, &record).await {
            tracing::warn!("Cache store skipped for {}: {}", coords, e);
        }

        Ok(record)
    }
}

/// Assemble a weather record from a fresh observation and forecast feed
pub fn build_record(
    current: CurrentObservation,
    forecast: ForecastFeed,
    now: DateTime<Utc>,
) -> WeatherRecord {
    let farming_advice = generate_farming_advice(&Observation {
        temperature: current.raw_temperature,
        humidity: current.raw_humidity,
        wind_speed: current.raw_wind_speed,
        description: &current.conditions.description,
    });

    WeatherRecord {
        id: Uuid::new_v4(),
        location: current.location,
        current: current.conditions,
        forecast: aggregate_daily(&forecast.samples, forecast.utc_offset_seconds),
        farming_advice,
        created_at: now,
        updated_at: now,
    }
}
