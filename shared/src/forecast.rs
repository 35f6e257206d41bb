//! Daily forecast aggregation
//!
//! Collapses the provider's 3-hourly samples into per-day summaries.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::models::{DayForecast, ForecastSample, TemperatureRange};

/// Maximum number of days kept in a forecast
pub const MAX_FORECAST_DAYS: usize = 5;

/// Calendar date of a UNIX timestamp at the given UTC offset
///
/// Returns `None` for timestamps chrono cannot represent. An offset outside
/// ±24h falls back to UTC.
pub fn local_date(timestamp: i64, utc_offset_seconds: i32) -> Option<NaiveDate> {
    let offset = FixedOffset::east_opt(utc_offset_seconds).unwrap_or_else(|| Utc.fix());
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.with_timezone(&offset).date_naive())
}

/// Group samples by local calendar date and summarise each day
///
/// Days keep the order in which their date first appears in the feed and only
/// the first [`MAX_FORECAST_DAYS`] dates are returned. The representative
/// description and icon come from the middle sample of each day
/// (index `len / 2`).
pub fn aggregate_daily(samples: &[ForecastSample], utc_offset_seconds: i32) -> Vec<DayForecast> {
    let mut days: Vec<(NaiveDate, Vec<&ForecastSample>)> = Vec::new();

    for sample in samples {
        let Some(date) = local_date(sample.timestamp, utc_offset_seconds) else {
            continue;
        };
        match days.iter_mut().find(|(d, _)| *d == date) {
            Some((_, items)) => items.push(sample),
            None => days.push((date, vec![sample])),
        }
    }

    days.into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, items)| summarize_day(date, &items))
        .collect()
}

/// `items` is never empty: a day only exists once a sample lands on it.
fn summarize_day(date: NaiveDate, items: &[&ForecastSample]) -> DayForecast {
    let count = items.len() as f64;

    let min = items
        .iter()
        .map(|s| s.temperature)
        .fold(f64::INFINITY, f64::min);
    let max = items
        .iter()
        .map(|s| s.temperature)
        .fold(f64::NEG_INFINITY, f64::max);

    let humidity = items.iter().map(|s| s.humidity).sum::<f64>() / count;
    let wind_speed = items.iter().map(|s| s.wind_speed).sum::<f64>() / count;

    let middle = items[items.len() / 2];

    DayForecast {
        date,
        temperature: TemperatureRange { min, max },
        humidity: humidity.round() as i64,
        wind_speed: wind_speed.round() as i64,
        description: middle.description.clone(),
        icon: middle.icon.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-11-15T00:00:00Z
    const DAY_START: i64 = 1_700_006_400;
    const THREE_HOURS: i64 = 3 * 3600;

    fn sample(timestamp: i64, temperature: f64, description: &str) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature,
            humidity: 60.0,
            wind_speed: 3.0,
            description: description.to_string(),
            icon: format!("icon-{}", description),
        }
    }

    #[test]
    fn test_single_day_min_max_and_middle_sample() {
        let temps = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 18.0, 16.0];
        let samples: Vec<_> = temps
            .iter()
            .enumerate()
            .map(|(i, t)| sample(DAY_START + i as i64 * THREE_HOURS, *t, &format!("s{}", i)))
            .collect();

        let days = aggregate_daily(&samples, 0);

        assert_eq!(days.len(), 1);
        let day = &days[0];
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
        assert_eq!(day.temperature.min, 10.0);
        assert_eq!(day.temperature.max, 20.0);
        assert_eq!(day.description, "s4");
        assert_eq!(day.icon, "icon-s4");
    }

    #[test]
    fn test_single_sample_day() {
        let days = aggregate_daily(&[sample(DAY_START, 21.5, "clear sky")], 0);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].temperature.min, 21.5);
        assert_eq!(days[0].temperature.max, 21.5);
        assert_eq!(days[0].humidity, 60);
        assert_eq!(days[0].wind_speed, 3);
        assert_eq!(days[0].description, "clear sky");
    }

    #[test]
    fn test_means_are_rounded() {
        let mut a = sample(DAY_START, 20.0, "a");
        a.humidity = 70.0;
        a.wind_speed = 2.0;
        let mut b = sample(DAY_START + THREE_HOURS, 22.0, "b");
        b.humidity = 75.0;
        b.wind_speed = 5.0;

        let days = aggregate_daily(&[a, b], 0);
        assert_eq!(days[0].humidity, 73); // 72.5
        assert_eq!(days[0].wind_speed, 4); // 3.5
        assert_eq!(days[0].description, "b");
    }

    #[test]
    fn test_truncates_to_five_days_in_feed_order() {
        let samples: Vec<_> = (0..40)
            .map(|i| sample(DAY_START + i * THREE_HOURS, 20.0, "x"))
            .collect();

        let days = aggregate_daily(&samples, 0);
        assert_eq!(days.len(), MAX_FORECAST_DAYS);
        for pair in days.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_feed_order_is_not_resorted() {
        let day = 24 * 3600;
        let samples = vec![
            sample(DAY_START + 2 * day, 20.0, "third"),
            sample(DAY_START, 20.0, "first"),
            sample(DAY_START + day, 20.0, "second"),
        ];

        let days = aggregate_daily(&samples, 0);
        let order: Vec<_> = days.iter().map(|d| d.description.as_str()).collect();
        assert_eq!(order, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_non_contiguous_samples_share_a_day() {
        let samples = vec![
            sample(DAY_START, 10.0, "a"),
            sample(DAY_START + 24 * 3600, 30.0, "b"),
            sample(DAY_START + THREE_HOURS, 14.0, "c"),
        ];

        let days = aggregate_daily(&samples, 0);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].temperature.min, 10.0);
        assert_eq!(days[0].temperature.max, 14.0);
        assert_eq!(days[0].description, "c");
    }

    #[test]
    fn test_utc_offset_shifts_the_day() {
        // 21:00Z on the 14th is already the 15th in UTC+5:30
        let ts = DAY_START - THREE_HOURS;
        assert_eq!(
            local_date(ts, 0),
            Some(NaiveDate::from_ymd_opt(2023, 11, 14).unwrap())
        );
        assert_eq!(
            local_date(ts, 19_800),
            Some(NaiveDate::from_ymd_opt(2023, 11, 15).unwrap())
        );
    }

    #[test]
    fn test_empty_feed() {
        assert!(aggregate_daily(&[], 0).is_empty());
    }
}
