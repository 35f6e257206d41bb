//! Validation utilities for weather queries
//!
//! Query parameters arrive as raw strings so that missing and malformed
//! values can be reported with a readable message instead of a generic
//! extractor rejection.

use crate::types::Coordinates;

/// Default look-back for the history query
pub const DEFAULT_HISTORY_DAYS: i64 = 7;

/// Upper bound for the history look-back
pub const MAX_HISTORY_DAYS: i64 = 365;

/// Validate that coordinates are finite and within WGS84 bounds
pub fn validate_coordinates(coords: &Coordinates) -> Result<(), &'static str> {
    if !coords.lat.is_finite() || !coords.lon.is_finite() {
        return Err("Latitude and longitude must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&coords.lat) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&coords.lon) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Parse `lat`/`lon` query values into validated coordinates
pub fn parse_coordinates(lat: Option<&str>, lon: Option<&str>) -> Result<Coordinates, &'static str> {
    let (lat, lon) = match (non_blank(lat), non_blank(lon)) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Err("Latitude and longitude are required"),
    };

    let lat: f64 = lat
        .parse()
        .map_err(|_| "Latitude and longitude must be numbers")?;
    let lon: f64 = lon
        .parse()
        .map_err(|_| "Latitude and longitude must be numbers")?;

    let coords = Coordinates::new(lat, lon);
    validate_coordinates(&coords)?;
    Ok(coords)
}

/// Validate a city query value, returning it trimmed
pub fn validate_city(city: Option<&str>) -> Result<&str, &'static str> {
    non_blank(city).ok_or("City name is required")
}

/// Parse the `days` query value for the history endpoint
pub fn parse_history_days(days: Option<&str>) -> Result<i64, &'static str> {
    let Some(days) = non_blank(days) else {
        return Ok(DEFAULT_HISTORY_DAYS);
    };

    let days: i64 = days.parse().map_err(|_| "Days must be a whole number")?;
    if days < 1 {
        return Err("Days must be at least 1");
    }
    if days > MAX_HISTORY_DAYS {
        return Err("Days must be at most 365");
    }
    Ok(days)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
