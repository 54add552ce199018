//! Rolling hourly congestion forecast.
//!
//! [`engine::ForecastEngine`] fetches the live signals and runs one pipeline
//! in either live or fallback mode. [`scoring`] holds the per-signal scores
//! and [`windows`] turns a forecast into travel recommendations.

pub mod engine;
pub mod scoring;
pub mod types;
pub mod windows;

pub use engine::{ForecastEngine, ForecastMode};
pub use types::{CongestionForecastEntry, Forecast, ForecastBasis};
pub use windows::{TravelHour, TravelWindows};
