//! Historical baseline of hourly airport activity.
//!
//! [`generator`] synthesizes the 90-day series, [`store`] owns it and applies
//! the retention window, [`calendar`] holds the day-of-week and peak-travel
//! rules.

pub mod calendar;
pub mod generator;
pub mod store;
pub mod types;

pub use store::HistoricalStore;
pub use types::{HistoricalTrendPoint, HourlyObservation, WeatherCondition};
