//! WebAssembly module for the Kisan Setu weather advisory service
//!
//! Lets the mobile client work offline with data it already holds:
//! - Farming advice from current conditions
//! - Daily forecast aggregation from raw 3-hourly samples
//! - Query validation before calling the backend

use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::advisory::*;
pub use shared::forecast::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Generate farming advice, returned as JSON
#[wasm_bindgen]
pub fn farming_advice(temperature: f64, humidity: f64, wind_speed: f64, description: &str) -> String {
    let advice = generate_farming_advice(&Observation {
        temperature,
        humidity,
        wind_speed,
        description,
    });
    to_json(&advice)
}

/// Aggregate a JSON array of forecast samples into daily summaries (JSON)
#[wasm_bindgen]
pub fn aggregate_forecast(samples_json: &str, utc_offset_seconds: i32) -> Result<String, JsValue> {
    aggregate_forecast_json(samples_json, utc_offset_seconds).map_err(|e| JsValue::from_str(&e))
}

/// Check coordinates before sending a request
#[wasm_bindgen]
pub fn coordinates_are_valid(lat: f64, lon: f64) -> bool {
    validate_coordinates(&Coordinates::new(lat, lon)).is_ok()
}

/// Irrigation flag straight from a cached record's JSON
#[wasm_bindgen]
pub fn record_needs_irrigation(record_json: &str) -> Result<bool, JsValue> {
    needs_irrigation(record_json).map_err(|e| JsValue::from_str(&e))
}

fn aggregate_forecast_json(samples_json: &str, utc_offset_seconds: i32) -> Result<String, String> {
    let samples: Vec<ForecastSample> = serde_json::from_str(samples_json)
        .map_err(|e| format!("Invalid forecast samples JSON: {}", e))?;
    Ok(to_json(&aggregate_daily(&samples, utc_offset_seconds)))
}

fn needs_irrigation(record_json: &str) -> Result<bool, String> {
    #[derive(Deserialize)]
    struct AdviceOnly {
        farming_advice: FarmingAdvice,
    }

    let record: AdviceOnly = serde_json::from_str(record_json)
        .map_err(|e| format!("Invalid weather record JSON: {}", e))?;
    Ok(record.farming_advice.irrigation_needed)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
