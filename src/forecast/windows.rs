//! Best and worst hours to travel, derived from a forecast.

use serde::{Deserialize, Serialize};

use super::types::CongestionForecastEntry;

const WINDOW_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelHour {
    pub hour: u32,
    pub bar_height: u32,
    pub flight_count: u32,
}

impl From<&CongestionForecastEntry> for TravelHour {
    fn from(entry: &CongestionForecastEntry) -> Self {
        Self {
            hour: entry.hour,
            bar_height: entry.bar_height,
            flight_count: entry.flight_count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelWindows {
    /// Lowest bar heights, quietest first.
    pub best: Vec<TravelHour>,
    /// Highest bar heights, busiest first.
    pub avoid: Vec<TravelHour>,
    pub best_flight_count: u32,
    pub avoid_flight_count: u32,
    pub message: String,
}

impl TravelWindows {
    /// Ties keep forecast order since the sort is stable.
    pub fn from_forecast(entries: &[CongestionForecastEntry]) -> Self {
        if entries.is_empty() {
            return Self {
                message: "No forecast available.".to_string(),
                ..Self::default()
            };
        }

        let mut ranked: Vec<TravelHour> = entries.iter().map(TravelHour::from).collect();
        ranked.sort_by_key(|h| h.bar_height);

        let best: Vec<TravelHour> = ranked.iter().take(WINDOW_SIZE).copied().collect();
        let avoid: Vec<TravelHour> = ranked.iter().rev().take(WINDOW_SIZE).copied().collect();

        let best_flight_count = best.iter().map(|h| h.flight_count).sum();
        let avoid_flight_count = avoid.iter().map(|h| h.flight_count).sum();

        let message = format!(
            "Best times to travel: {} (about {} flights). Avoid {} (about {} flights).",
            hour_list(&best),
            best_flight_count,
            hour_list(&avoid),
            avoid_flight_count
        );

        Self {
            best,
            avoid,
            best_flight_count,
            avoid_flight_count,
            message,
        }
    }
}

fn hour_list(hours: &[TravelHour]) -> String {
    hours
        .iter()
        .map(|h| format_hour(h.hour))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `0` → "12 AM", `13` → "1 PM".
pub fn format_hour(hour: u32) -> String {
    let hour = hour % 24;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {suffix}")
}
