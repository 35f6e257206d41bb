//! Farming advisory rules
//!
//! Turns the current observation into crop, irrigation, pest and harvest
//! guidance. Rules run in a fixed order and each one may overwrite fields
//! set by an earlier one, so the last matching rule wins on conflict.

use crate::models::FarmingAdvice;

pub const TEMP_TOO_COLD_CELSIUS: f64 = 10.0;
pub const TEMP_TOO_HOT_CELSIUS: f64 = 35.0;
pub const HUMIDITY_HIGH_PERCENT: f64 = 80.0;
pub const HUMIDITY_LOW_PERCENT: f64 = 30.0;
pub const WIND_HIGH_MPS: f64 = 15.0;
pub const CLEAR_SKY_IRRIGATION_CELSIUS: f64 = 25.0;

/// Raw observation the rules are evaluated against
///
/// Temperature is the unrounded provider value, not the rounded figure shown
/// in `CurrentConditions`.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub description: &'a str,
}

impl Default for FarmingAdvice {
    fn default() -> Self {
        Self {
            crop_suitability: "Good".to_string(),
            irrigation_needed: false,
            pest_risk: "Low".to_string(),
            harvest_recommendation: "Normal conditions".to_string(),
        }
    }
}

/// Generate farming advice for an observation
pub fn generate_farming_advice(obs: &Observation<'_>) -> FarmingAdvice {
    let mut advice = FarmingAdvice::default();
    let description = obs.description.to_lowercase();

    // Temperature
    if obs.temperature < TEMP_TOO_COLD_CELSIUS {
        advice.crop_suitability = "Poor - Too cold for most crops".to_string();
        advice.harvest_recommendation = "Delay harvest until temperature rises".to_string();
    }
    if obs.temperature > TEMP_TOO_HOT_CELSIUS {
        advice.crop_suitability = "Poor - Too hot for most crops".to_string();
        advice.irrigation_needed = true;
        advice.harvest_recommendation = "Harvest early morning to avoid heat stress".to_string();
    }

    // Humidity
    if obs.humidity > HUMIDITY_HIGH_PERCENT {
        advice.pest_risk = "High - Fungal diseases likely".to_string();
        advice.harvest_recommendation =
            "Ensure good ventilation and avoid overwatering".to_string();
    }
    if obs.humidity < HUMIDITY_LOW_PERCENT {
        advice.irrigation_needed = true;
        advice.harvest_recommendation = "Increase irrigation frequency".to_string();
    }

    // Wind
    if obs.wind_speed > WIND_HIGH_MPS {
        advice.harvest_recommendation = "Avoid harvesting in high winds".to_string();
        advice.pest_risk = "Medium - Wind can spread pests".to_string();
    }

    // Sky condition; rain overrides everything above
    if description.contains("rain") {
        advice.irrigation_needed = false;
        advice.pest_risk = "High - Rain increases disease risk".to_string();
        advice.harvest_recommendation = "Avoid harvesting during wet conditions".to_string();
    } else if (description.contains("sunny") || description.contains("clear"))
        && obs.temperature > CLEAR_SKY_IRRIGATION_CELSIUS
    {
        advice.irrigation_needed = true;
    }

    advice
}
