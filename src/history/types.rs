//! Data types for the historical baseline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::history::calendar::day_of_week;

/// Weather recorded against a historical hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Clear,
    Rain,
    Fog,
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clear => write!(f, "clear"),
            Self::Rain => write!(f, "rain"),
            Self::Fog => write!(f, "fog"),
        }
    }
}

/// One observation of airport activity for a specific date and hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalTrendPoint {
    pub date: NaiveDate,
    /// 0–23.
    pub hour: u32,
    /// 0–6, Sunday = 0.
    pub day_of_week: u32,
    pub flight_count: u32,
    pub avg_delay_minutes: u32,
    /// 0–100.
    pub congestion_score: u32,
    /// 0–100.
    pub parking_occupancy: u32,
    pub weather_condition: Option<WeatherCondition>,
    /// Set for points inside a holiday or summer peak-travel window.
    pub special_event: bool,
}

/// An hourly observation without a calendar stamp.
///
/// The store stamps date and day-of-week when the observation is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyObservation {
    pub hour: u32,
    pub flight_count: u32,
    pub avg_delay_minutes: u32,
    pub congestion_score: u32,
    pub parking_occupancy: u32,
    pub weather_condition: Option<WeatherCondition>,
    pub special_event: bool,
}

impl HourlyObservation {
    /// Stamps the observation with `date`, clamping scores into 0–100.
    pub fn at(self, date: NaiveDate) -> HistoricalTrendPoint {
        HistoricalTrendPoint {
            date,
            hour: self.hour % 24,
            day_of_week: day_of_week(date),
            flight_count: self.flight_count,
            avg_delay_minutes: self.avg_delay_minutes,
            congestion_score: self.congestion_score.min(100),
            parking_occupancy: self.parking_occupancy.min(100),
            weather_condition: self.weather_condition,
            special_event: self.special_event,
        }
    }
}

/// Scales an hourly flight count to a 0–100 congestion score.
pub fn congestion_from_flights(flight_count: u32, flights_at_full_congestion: f64) -> u32 {
    if flights_at_full_congestion <= 0.0 {
        return 100;
    }
    let score = (f64::from(flight_count) / flights_at_full_congestion * 100.0).round();
    score.clamp(0.0, 100.0) as u32
}
