use chrono::{DateTime, Local, Timelike};
use log::{error, info, warn};
use crate::config::AlertParameters;
use crate::models::forecast::{ForecastSummary, HourDetail};
use crate::models::meteo_forecast::ForecastSeries;

/// Number of forecast hours aggregated into a summary
pub const FORECAST_HOURS: usize = 3;

/// Finds the index of the current hour in the forecast series.
///
/// The series timestamps are scanned for the first one matching now
/// truncated to the hour. When nothing matches, the numeric hour of day is
/// used as a direct index instead. That estimate is only correct when the
/// series starts at hour 0 of the current day, which holds for a one day
/// forecast window but is not verified here.
///
/// # Arguments
///
/// * 'series' - the forecast series to scan
/// * 'now' - the moment to locate
pub fn current_hour_index(series: &ForecastSeries, now: DateTime<Local>) -> usize {
    let current_hour = now.format("%Y-%m-%dT%H").to_string();

    for (i, time) in series.time.iter().enumerate() {
        if time.starts_with(&current_hour) {
            info!("Found current hour index: {} for time {}", i, time);
            return i;
        }
    }

    warn!("Exact time match not found, estimating index based on hour {}", now.hour());
    now.hour() as usize
}

/// Aggregates the next three forecast hours into a summary, or None when the
/// series arrays turn out not to be parallel.
///
/// Hours beyond the end of the series are skipped, so the summary may hold
/// fewer than three entries. The alert flag is set when the maximum
/// probability reaches the threshold or when testing mode forces it.
///
/// # Arguments
///
/// * 'series' - the forecast series to aggregate
/// * 'city_name' - display name for the summary
/// * 'now' - the moment of checking
/// * 'alert' - threshold and testing mode parameters
pub fn analyze_rain(
    series: &ForecastSeries,
    city_name: &str,
    now: DateTime<Local>,
    alert: &AlertParameters,
) -> Option<ForecastSummary> {
    let current_index = current_hour_index(series, now);

    let mut hours: Vec<HourDetail> = Vec::with_capacity(FORECAST_HOURS);
    let mut max_probability: f64 = 0.0;
    let mut total_precipitation: f64 = 0.0;

    for i in 0..FORECAST_HOURS {
        let hour_index = current_index + i;

        if hour_index < series.time.len() {
            let time = series.time[hour_index].clone();
            let (Some(&probability), Some(&precipitation)) =
                (series.probability.get(hour_index), series.precipitation.get(hour_index))
            else {
                error!("Forecast arrays out of step at index {}", hour_index);
                return None;
            };

            info!("Hour {}: {} - {}% chance, {}mm", i + 1, time, probability, precipitation);

            hours.push(HourDetail { time, probability, precipitation });
            max_probability = max_probability.max(probability);
            total_precipitation += precipitation;
        } else {
            warn!("Not enough forecast data for hour {}", i + 1);
        }
    }

    let alert_triggered = max_probability >= alert.threshold || alert.testing_mode;

    info!(
        "Analysis complete - Max probability: {}%, Total precipitation: {}mm, Alert triggered: {}",
        max_probability, total_precipitation, alert_triggered
    );

    Some(ForecastSummary {
        city: city_name.to_string(),
        check_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        hours,
        max_probability,
        total_precipitation,
        alert_triggered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn series(probabilities: &[f64]) -> ForecastSeries {
        ForecastSeries {
            time: (0..probabilities.len())
                .map(|h| format!("2026-08-26T{:02}:00", h))
                .collect(),
            probability: probabilities.to_vec(),
            precipitation: probabilities.iter().map(|_| 0.1).collect(),
        }
    }

    fn day_of(probabilities: &[f64]) -> ForecastSeries {
        let mut padded = probabilities.to_vec();
        padded.resize(24, 0.0);
        series(&padded)
    }

    fn at_hour(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 26, hour, 15, 0).unwrap()
    }

    fn alert_params(threshold: f64, testing_mode: bool) -> AlertParameters {
        AlertParameters {
            city: "madison".to_string(),
            default_city: "madison".to_string(),
            threshold,
            testing_mode,
        }
    }

    #[test]
    fn index_resolves_by_timestamp_prefix() {
        let series = day_of(&[]);

        assert_eq!(current_hour_index(&series, at_hour(2)), 2);
        assert_eq!(current_hour_index(&series, at_hour(23)), 23);
    }

    #[test]
    fn index_falls_back_to_hour_of_day() {
        let mut series = day_of(&[]);
        for time in series.time.iter_mut() {
            *time = time.replace("2026-08-26", "2026-08-27");
        }

        assert_eq!(current_hour_index(&series, at_hour(5)), 5);
    }

    #[test]
    fn aggregates_three_hours_from_current_index() {
        let series = day_of(&[10.0, 20.0, 60.0, 30.0, 5.0]);
        let summary = analyze_rain(&series, "Madison", at_hour(2), &alert_params(50.0, false)).unwrap();

        assert_eq!(summary.hours.len(), 3);
        assert_eq!(summary.hours[0].time, "2026-08-26T02:00");
        assert_eq!(summary.hours[0].probability, 60.0);
        assert_eq!(summary.hours[1].probability, 30.0);
        assert_eq!(summary.hours[2].probability, 5.0);
        assert_eq!(summary.max_probability, 60.0);
        assert!((summary.total_precipitation - 0.3).abs() < 1e-9);
        assert!(summary.alert_triggered);
        assert_eq!(summary.city, "Madison");
        assert_eq!(summary.check_time, "2026-08-26 02:15:00");
    }

    #[test]
    fn no_alert_below_threshold() {
        let series = day_of(&[10.0, 20.0, 30.0, 40.0]);
        let summary = analyze_rain(&series, "Madison", at_hour(1), &alert_params(50.0, false)).unwrap();

        assert_eq!(summary.max_probability, 40.0);
        assert!(!summary.alert_triggered);
    }

    #[test]
    fn threshold_is_inclusive() {
        let series = day_of(&[0.0, 50.0]);
        let summary = analyze_rain(&series, "Madison", at_hour(0), &alert_params(50.0, false)).unwrap();

        assert!(summary.alert_triggered);
    }

    #[test]
    fn testing_mode_forces_alert() {
        let series = day_of(&[5.0, 5.0, 5.0]);
        let summary = analyze_rain(&series, "Madison", at_hour(0), &alert_params(50.0, true)).unwrap();

        assert_eq!(summary.max_probability, 5.0);
        assert!(summary.alert_triggered);
    }

    #[test]
    fn last_hour_yields_single_entry() {
        let series = day_of(&[]);
        let summary = analyze_rain(&series, "Madison", at_hour(23), &alert_params(50.0, false)).unwrap();

        assert_eq!(summary.hours.len(), 1);
        assert_eq!(summary.hours[0].time, "2026-08-26T23:00");
    }

    #[test]
    fn index_past_series_yields_empty_summary() {
        let series = series(&[10.0, 20.0]);
        let summary = analyze_rain(&series, "Madison", at_hour(6), &alert_params(50.0, false)).unwrap();

        assert!(summary.hours.is_empty());
        assert_eq!(summary.max_probability, 0.0);
        assert_eq!(summary.total_precipitation, 0.0);
        assert!(!summary.alert_triggered);
    }

    #[test]
    fn mismatched_arrays_fail_analysis() {
        let mut series = day_of(&[10.0, 20.0, 30.0]);
        series.probability.truncate(2);

        assert!(analyze_rain(&series, "Madison", at_hour(1), &alert_params(50.0, false)).is_none());
    }
}
