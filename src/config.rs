//! Calibration constants and runtime settings.
//!
//! The weights and tables below are hand-tuned and stand in for real
//! historical data. They can be overridden from a JSON file:
//! ```json
//! {
//!   "history": { "weekendMultiplier": 1.2 },
//!   "forecast": { "flightWeight": 0.6, "parkingWeight": 0.2 }
//! }
//! ```
//! Missing keys keep their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Flights (departures + arrivals) per hour on a typical day, indexed by hour.
pub const HOURLY_BASE_LOAD: [u32; 24] = [
    8, 5, 3, 2, 4, 12, 28, 45, 52, 38, 42, 46, 48, 44, 46, 49, 52, 58, 55, 48, 42, 35, 22, 15,
];

/// All tunable constants of the historical model, trend analyzer and forecast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Calibration {
    pub history: HistoryCalibration,
    pub trend: TrendWeights,
    pub forecast: ForecastCalibration,
}

impl Calibration {
    /// Loads calibration overrides from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read calibration file '{path}'"))?;
        let calibration: Calibration = serde_json::from_str(&content)
            .with_context(|| format!("invalid calibration file '{path}'"))?;
        Ok(calibration)
    }

    /// Loads from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// A calendar window of elevated travel demand, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakWindow {
    pub month: u32,
    pub first_day: u32,
    pub last_day: u32,
}

impl PeakWindow {
    pub const fn new(month: u32, first_day: u32, last_day: u32) -> Self {
        Self {
            month,
            first_day,
            last_day,
        }
    }
}

/// Constants for synthesizing the 90-day hourly baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryCalibration {
    pub hourly_base_load: [u32; 24],
    /// Applied on Friday, Saturday and Sunday.
    pub weekend_multiplier: f64,
    pub monday_multiplier: f64,
    pub peak_travel_multiplier: f64,
    pub peak_windows: Vec<PeakWindow>,
    /// Adds the Monday–Sunday week around US Thanksgiving to `peak_windows`.
    pub thanksgiving_week: bool,
    pub weather_event_probability: f64,
    /// Share of weather events that are rain; the rest are fog.
    pub rain_share: f64,
    pub weather_penalty: f64,
    /// Half-width of the uniform multiplicative jitter (0.15 = ±15%).
    pub jitter: f64,
    /// Hourly flight volume that maps to a congestion score of 100.
    pub flights_at_full_congestion: f64,
    pub retention_days: i64,
}

impl Default for HistoryCalibration {
    fn default() -> Self {
        Self {
            hourly_base_load: HOURLY_BASE_LOAD,
            weekend_multiplier: 1.15,
            monday_multiplier: 1.08,
            peak_travel_multiplier: 1.25,
            peak_windows: vec![
                PeakWindow::new(12, 20, 31),
                PeakWindow::new(1, 1, 3),
                PeakWindow::new(6, 25, 30),
                PeakWindow::new(7, 1, 31),
                PeakWindow::new(8, 1, 15),
            ],
            thanksgiving_week: true,
            weather_event_probability: 0.1,
            rain_share: 0.6,
            weather_penalty: 0.7,
            jitter: 0.15,
            flights_at_full_congestion: 65.0,
            retention_days: 90,
        }
    }
}

/// Blend weights for [`crate::analyzers::trend::analyze_trend_for_hour`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrendWeights {
    pub historical: f64,
    pub recent: f64,
    pub day_of_week: f64,
    pub special_event: f64,
    pub recent_window_days: i64,
}

impl Default for TrendWeights {
    fn default() -> Self {
        Self {
            historical: 0.4,
            recent: 0.3,
            day_of_week: 0.2,
            special_event: 0.1,
            recent_window_days: 7,
        }
    }
}

/// Weights and shape parameters for the live forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastCalibration {
    pub flight_weight: f64,
    pub parking_weight: f64,
    pub traffic_weight: f64,
    pub horizon_hours: u32,
    /// Flight-count estimates vary by `-jitter..jitter` around the base load.
    pub flight_count_jitter: u32,
}

impl Default for ForecastCalibration {
    fn default() -> Self {
        Self {
            flight_weight: 0.5,
            parking_weight: 0.3,
            traffic_weight: 0.2,
            horizon_hours: 12,
            flight_count_jitter: 5,
        }
    }
}

/// Runtime settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub flight_feed_url: Option<String>,
    pub parking_feed_url: Option<String>,
    pub traffic_feed_url: Option<String>,
    /// Append an observation to the history after every live refresh.
    pub learn_from_live: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        let url = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            flight_feed_url: url("FLIGHT_FEED_URL"),
            parking_feed_url: url("PARKING_FEED_URL"),
            traffic_feed_url: url("TRAFFIC_FEED_URL"),
            learn_from_live: std::env::var("LEARN_FROM_LIVE")
                .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_defaults_match_documented_constants() {
        let calibration = Calibration::default();
        assert_eq!(calibration.history.hourly_base_load[17], 58);
        assert_eq!(calibration.history.retention_days, 90);
        assert_eq!(calibration.trend.historical, 0.4);
        assert_eq!(calibration.forecast.horizon_hours, 12);
        assert_eq!(calibration.forecast.flight_weight, 0.5);
    }

    #[test]
    fn test_load_partial_override_keeps_defaults() {
        let path = temp_path("airport_congestion_calibration.json");
        fs::write(
            &path,
            r#"{ "forecast": { "flightWeight": 0.6 }, "history": { "jitter": 0.0 } }"#,
        )
        .unwrap();

        let calibration = Calibration::load(&path).unwrap();
        assert_eq!(calibration.forecast.flight_weight, 0.6);
        assert_eq!(calibration.forecast.parking_weight, 0.3);
        assert_eq!(calibration.history.jitter, 0.0);
        assert_eq!(calibration.history.monday_multiplier, 1.08);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Calibration::load("/nonexistent/airport_congestion.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_without_path() {
        let calibration = Calibration::load_or_default(None).unwrap();
        assert_eq!(calibration, Calibration::default());
    }
}
