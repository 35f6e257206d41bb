//! Forecast aggregation and farming advice property tests
//!
//! Properties checked:
//! - Daily summaries never exceed five days and never repeat a date
//! - Daily bounds are the extremes and enclose the daily averages
//! - Days keep the order the provider reported them in
//! - Rain always disables irrigation; heat always enables it otherwise

use chrono::Duration;
use proptest::prelude::*;
use shared::advisory::{generate_farming_advice, Observation};
use shared::forecast::{aggregate_daily, local_date, MAX_FORECAST_DAYS};
use shared::models::ForecastSample;
use shared::validation::{parse_coordinates, parse_history_days};
use std::collections::HashSet;

/// 2023-11-15 00:00:00 UTC
const DAY_START: i64 = 1_700_006_400;

fn sample(timestamp: i64, temperature: f64, humidity: f64) -> ForecastSample {
    ForecastSample {
        timestamp,
        temperature,
        humidity,
        wind_speed: 3.0,
        description: "few clouds".to_string(),
        icon: "02d".to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A full 40-sample feed starting mid-day spans six local dates
    #[test]
    fn test_full_feed_truncated_to_five_days() {
        let start = DAY_START + 12 * 3600;
        let samples: Vec<_> = (0..40)
            .map(|i| sample(start + i * 3 * 3600, 20.0, 50.0))
            .collect();

        let days = aggregate_daily(&samples, 0);

        assert_eq!(days.len(), MAX_FORECAST_DAYS);
        assert_eq!(days[0].date, local_date(start, 0).unwrap());
        assert_eq!(days[4].date - days[0].date, Duration::days(4));
    }

    /// IST shifts the 20:00 UTC sample onto the next local day
    #[test]
    fn test_local_offset_moves_day_boundary() {
        let ist = 5 * 3600 + 1800;
        let samples = vec![
            sample(DAY_START + 17 * 3600, 20.0, 50.0),
            sample(DAY_START + 20 * 3600, 30.0, 50.0),
        ];

        assert_eq!(aggregate_daily(&samples, 0).len(), 1);
        let days = aggregate_daily(&samples, ist);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].temperature.max, 20.0);
        assert_eq!(days[1].temperature.min, 30.0);
    }

    #[test]
    fn test_rain_and_heat_combined() {
        let advice = generate_farming_advice(&Observation {
            temperature: 38.0,
            humidity: 85.0,
            wind_speed: 2.0,
            description: "heavy intensity rain",
        });

        assert_eq!(advice.crop_suitability, "Poor - Too hot for most crops");
        assert!(!advice.irrigation_needed);
        assert_eq!(advice.pest_risk, "High - Rain increases disease risk");
        assert_eq!(
            advice.harvest_recommendation,
            "Avoid harvesting during wet conditions"
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn feed_strategy() -> impl Strategy<Value = Vec<ForecastSample>> {
        prop::collection::vec(
            (0i64..(8 * 24 * 3600), -10.0f64..45.0, 0.0f64..100.0),
            0..48,
        )
        .prop_map(|raw| {
            raw.into_iter()
                .map(|(offset, temp, humidity)| sample(DAY_START + offset, temp, humidity))
                .collect()
        })
    }

    fn offset_strategy() -> impl Strategy<Value = i32> {
        -12 * 3600..=14 * 3600
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// At most five days, each date appearing once
        #[test]
        fn prop_forecast_bounded_and_unique(
            samples in feed_strategy(),
            offset in offset_strategy()
        ) {
            let days = aggregate_daily(&samples, offset);

            prop_assert!(days.len() <= MAX_FORECAST_DAYS);
            let dates: HashSet<_> = days.iter().map(|d| d.date).collect();
            prop_assert_eq!(dates.len(), days.len());
            prop_assert_eq!(days.is_empty(), samples.is_empty());
        }

        /// Bounds are the day's extremes, the mean temperature lies between
        /// them and humidity is the rounded mean of the day's samples
        #[test]
        fn prop_forecast_bounds_enclose_average(
            samples in feed_strategy(),
            offset in offset_strategy()
        ) {
            for day in aggregate_daily(&samples, offset) {
                let same_day: Vec<_> = samples
                    .iter()
                    .filter(|s| local_date(s.timestamp, offset) == Some(day.date))
                    .collect();
                prop_assert!(!same_day.is_empty());

                let count = same_day.len() as f64;
                let temps: Vec<f64> = same_day.iter().map(|s| s.temperature).collect();
                let min = temps.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let avg = temps.iter().sum::<f64>() / count;
                let humidity = same_day.iter().map(|s| s.humidity).sum::<f64>() / count;

                prop_assert_eq!(day.temperature.min, min);
                prop_assert_eq!(day.temperature.max, max);
                prop_assert!(day.temperature.min.round() <= avg.round());
                prop_assert!(avg.round() <= day.temperature.max.round());
                prop_assert_eq!(day.humidity, humidity.round() as i64);
                prop_assert!(day.humidity >= 0 && day.humidity <= 100);
            }
        }

        /// Days follow the first appearance of each date in the feed
        #[test]
        fn prop_forecast_keeps_feed_order(
            samples in feed_strategy(),
            offset in offset_strategy()
        ) {
            let mut first_seen = Vec::new();
            for s in &samples {
                let date = local_date(s.timestamp, offset).unwrap();
                if !first_seen.contains(&date) {
                    first_seen.push(date);
                }
            }
            first_seen.truncate(MAX_FORECAST_DAYS);

            let dates: Vec<_> = aggregate_daily(&samples, offset)
                .into_iter()
                .map(|d| d.date)
                .collect();
            prop_assert_eq!(dates, first_seen);
        }

        /// Rain always wins over every irrigation trigger
        #[test]
        fn prop_rain_disables_irrigation(
            temperature in -20.0f64..50.0,
            humidity in 0.0f64..100.0,
            wind_speed in 0.0f64..30.0,
            prefix in "(light |moderate |heavy intensity )?"
        ) {
            let description = format!("{}rain", prefix);
            let advice = generate_farming_advice(&Observation {
                temperature,
                humidity,
                wind_speed,
                description: &description,
            });

            prop_assert!(!advice.irrigation_needed);
            prop_assert_eq!(advice.pest_risk, "High - Rain increases disease risk");
        }

        /// Without rain, heat above the threshold always asks for irrigation
        #[test]
        fn prop_heat_requires_irrigation(
            temperature in 35.01f64..55.0,
            humidity in 0.0f64..100.0,
            wind_speed in 0.0f64..30.0
        ) {
            let advice = generate_farming_advice(&Observation {
                temperature,
                humidity,
                wind_speed,
                description: "haze",
            });

            prop_assert!(advice.irrigation_needed);
            prop_assert_eq!(advice.crop_suitability, "Poor - Too hot for most crops");
        }

        /// In-range numeric coordinates always parse
        #[test]
        fn prop_valid_coordinates_parse(
            lat in -90.0f64..=90.0,
            lon in -180.0f64..=180.0
        ) {
            let parsed = parse_coordinates(Some(&lat.to_string()), Some(&lon.to_string()));
            prop_assert!(parsed.is_ok());
        }

        /// History days outside 1..=365 are rejected
        #[test]
        fn prop_history_days_bounds(days in -1000i64..1000) {
            let result = parse_history_days(Some(&days.to_string()));
            prop_assert_eq!(result.is_ok(), (1..=365).contains(&days));
        }
    }
}
