//! Weather data models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resolved target of a weather query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// A place returned by the geocoding lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocodedPlace {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions as presented to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    /// Rounded to the nearest degree Celsius
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: i64,
    pub pressure: i64,
    /// Metres per second
    pub wind_speed: f64,
    /// Degrees, 0 when the provider omits it
    pub wind_direction: i64,
    /// Kilometres
    pub visibility: f64,
    /// Always 0: the free provider tier does not report UV
    pub uv_index: i64,
    pub description: String,
    pub icon: String,
}

/// One raw forecast point (3-hourly)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSample {
    /// UNIX seconds
    pub timestamp: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// Daily summary built from the samples falling on one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub temperature: TemperatureRange,
    pub humidity: i64,
    pub wind_speed: i64,
    pub description: String,
    pub icon: String,
}

/// Farming guidance derived from current conditions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FarmingAdvice {
    pub crop_suitability: String,
    pub irrigation_needed: bool,
    pub pest_risk: String,
    pub harvest_recommendation: String,
}

/// The unit returned to clients and the unit cached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherRecord {
    pub id: Uuid,
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Vec<DayForecast>,
    pub farming_advice: FarmingAdvice,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeatherRecord {
    /// Whether this record was created at or after `fresh_since`
    pub fn is_fresh(&self, fresh_since: DateTime<Utc>) -> bool {
        self.created_at >= fresh_since
    }
}
