//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap for geocoding, current conditions and the
//! 5-day / 3-hour forecast.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use shared::models::{CurrentConditions, ForecastSample, GeocodedPlace, Location};
use shared::types::Coordinates;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Visibility assumed when the provider omits it (metres)
const DEFAULT_VISIBILITY_METERS: f64 = 10_000.0;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Current observation as reported by the provider
///
/// Keeps the raw temperature and humidity the advisory rules run against
/// next to the rounded conditions shown to clients.
#[derive(Debug, Clone)]
pub struct CurrentObservation {
    pub location: Location,
    pub conditions: CurrentConditions,
    pub raw_temperature: f64,
    pub raw_humidity: f64,
    pub raw_wind_speed: f64,
}

/// Raw forecast feed plus the location's UTC offset
#[derive(Debug, Clone)]
pub struct ForecastFeed {
    pub utc_offset_seconds: i32,
    pub samples: Vec<ForecastSample>,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    coord: OWMCoord,
    weather: Vec<OWMWeather>,
    main: OWMMain,
    visibility: Option<f64>,
    wind: OWMWind,
    #[serde(default)]
    sys: OWMSys,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct OWMCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    #[serde(default)]
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
    deg: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OWMSys {
    #[serde(default)]
    country: String,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    #[serde(default)]
    city: Option<OWMCity>,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    weather: Vec<OWMWeather>,
    wind: OWMWind,
}

/// OpenWeatherMap geocoding result
#[derive(Debug, Deserialize)]
struct OWMGeoResult {
    name: String,
    #[serde(default)]
    country: String,
    lat: f64,
    lon: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient with a bounded per-request timeout
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a city name to its best geocoding match
    ///
    /// Returns `Ok(None)` when the provider knows no such place.
    pub async fn geocode(&self, city: &str) -> AppResult<Option<GeocodedPlace>> {
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let results: Vec<OWMGeoResult> = self
            .get_json(&url, &[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())])
            .await?;

        Ok(results.into_iter().next().map(|r| GeocodedPlace {
            name: r.name,
            country: r.country,
            lat: r.lat,
            lon: r.lon,
        }))
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current_weather(&self, coords: Coordinates) -> AppResult<CurrentObservation> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let (lat, lon) = (coords.lat.to_string(), coords.lon.to_string());
        let data: OWMCurrentResponse = self
            .get_json(
                &url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        Ok(convert_current_response(data))
    }

    /// Fetch the 5-day / 3-hour forecast by GPS coordinates
    pub async fn get_forecast(&self, coords: Coordinates) -> AppResult<ForecastFeed> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        let (lat, lon) = (coords.lat.to_string(), coords.lon.to_string());
        let data: OWMForecastResponse = self
            .get_json(
                &url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("appid", self.api_key.as_str()),
                    ("units", "metric"),
                ],
            )
            .await?;

        Ok(convert_forecast_response(data))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                AppError::Upstream(format!("Weather API request failed: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| {
                AppError::Upstream(format!(
                    "Failed to parse weather response: {}",
                    e.without_url()
                ))
            })
    }
}

/// Convert OpenWeatherMap current response to our format
fn convert_current_response(data: OWMCurrentResponse) -> CurrentObservation {
    let weather = data.weather.first();
    let description = weather.map(|w| w.description.clone()).unwrap_or_default();
    let icon = weather.map(|w| w.icon.clone()).unwrap_or_default();

    CurrentObservation {
        location: Location {
            name: data.name,
            country: data.sys.country,
            lat: data.coord.lat,
            lon: data.coord.lon,
        },
        conditions: CurrentConditions {
            temperature: data.main.temp.round() as i64,
            feels_like: data.main.feels_like.unwrap_or(data.main.temp).round() as i64,
            humidity: data.main.humidity.round() as i64,
            pressure: data.main.pressure.round() as i64,
            wind_speed: data.wind.speed,
            wind_direction: data.wind.deg.unwrap_or(0.0).round() as i64,
            visibility: data.visibility.unwrap_or(DEFAULT_VISIBILITY_METERS) / 1000.0,
            uv_index: 0,
            description,
            icon,
        },
        raw_temperature: data.main.temp,
        raw_humidity: data.main.humidity,
        raw_wind_speed: data.wind.speed,
    }
}

/// Convert OpenWeatherMap forecast response to our format
fn convert_forecast_response(data: OWMForecastResponse) -> ForecastFeed {
    let samples = data
        .list
        .into_iter()
        .map(|item| {
            let weather = item.weather.first();
            ForecastSample {
                timestamp: item.dt,
                temperature: item.main.temp,
                humidity: item.main.humidity,
                wind_speed: item.wind.speed,
                description: weather.map(|w| w.description.clone()).unwrap_or_default(),
                icon: weather.map(|w| w.icon.clone()).unwrap_or_default(),
            }
        })
        .collect();

    ForecastFeed {
        utc_offset_seconds: data.city.map(|c| c.timezone).unwrap_or(0),
        samples,
    }
}
