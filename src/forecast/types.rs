use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analyzers::{CongestionColor, CongestionLevel};

/// One hour of the rolling forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CongestionForecastEntry {
    pub hour: u32,
    /// Calendar day the hour falls on, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub congestion_level: CongestionLevel,
    pub congestion_color: CongestionColor,
    /// 0–100.
    pub bar_height: u32,
    pub flight_count: u32,
}

impl CongestionForecastEntry {
    /// Builds an entry, deriving level and color from `bar_height`.
    pub fn new(hour: u32, date: NaiveDate, bar_height: u32, flight_count: u32) -> Self {
        let bar_height = bar_height.min(100);
        let congestion_level = CongestionLevel::from_score(bar_height);

        Self {
            hour,
            date,
            congestion_level,
            congestion_color: congestion_level.color(),
            bar_height,
            flight_count,
        }
    }
}

/// Which pipeline produced a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastBasis {
    Live,
    Fallback,
}

impl std::fmt::Display for ForecastBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A full forecast together with the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub basis: ForecastBasis,
    pub entries: Vec<CongestionForecastEntry>,
}
