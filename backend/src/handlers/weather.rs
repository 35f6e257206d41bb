//! HTTP handlers for weather endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use shared::models::WeatherRecord;
use shared::validation::{parse_coordinates, parse_history_days, validate_city};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for a coordinate lookup
///
/// Values stay as strings so missing and malformed input can be reported
/// with a readable message.
#[derive(Debug, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Query parameters for a city lookup
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

/// Query parameters for the history lookup
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub days: Option<String>,
}

/// Get weather and farming advice by coordinates
pub async fn get_weather_by_coordinates(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> AppResult<Json<WeatherRecord>> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let coords = parse_coordinates(query.lat.as_deref(), query.lon.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = state.weather.by_coordinates(coords).await?;
    Ok(Json(record))
}

/// Get weather and farming advice by city name
pub async fn get_weather_by_city(
    State(state): State<AppState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> AppResult<Json<WeatherRecord>> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let city = validate_city(query.city.as_deref()).map_err(|e| AppError::Validation(e.to_string()))?;

    let record = state.weather.by_city(city).await?;
    Ok(Json(record))
}

/// Get stored weather records for coordinates, newest first
pub async fn get_weather_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Json<Vec<WeatherRecord>>> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let coords = parse_coordinates(query.lat.as_deref(), query.lon.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let days =
        parse_history_days(query.days.as_deref()).map_err(|e| AppError::Validation(e.to_string()))?;

    let records = state.weather.history(coords, days).await?;
    Ok(Json(records))
}
