//! Trend analysis over the historical baseline.
//!
//! This module answers "how busy should hour H on weekday D be" from the
//! stored series, rolls the series up into a dashboard summary, and holds
//! the score-to-level banding shared with the forecast.

pub mod banding;
pub mod summary;
pub mod trend;
pub mod utility;

pub use banding::{CongestionColor, CongestionLevel};
pub use summary::{TrendSummary, trend_summary};
pub use trend::{TrendAnalysisResult, TrendFactors, analyze_trend_for_hour};
