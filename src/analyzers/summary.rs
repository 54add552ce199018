//! Dashboard rollup over the full historical series.

use serde::{Deserialize, Serialize};

use crate::analyzers::utility::{mean, mean_score, stddev};
use crate::history::HistoricalStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyCongestion {
    pub hour: u32,
    pub avg_congestion: u32,
}

/// Busiest and quietest hours, average delay and a reliability score.
///
/// An empty store yields the default: hours 0, averages 0, reliability 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub busiest: HourlyCongestion,
    pub quietest: HourlyCongestion,
    /// Minutes.
    pub average_delay: u32,
    /// 0–100; drops as historical congestion varies more.
    pub reliability_score: u32,
}

/// Rounded mean congestion for every hour that has data, in hour order.
pub fn hourly_averages(store: &HistoricalStore) -> Vec<HourlyCongestion> {
    (0..24)
        .filter_map(|hour| {
            mean_score(
                store
                    .points()
                    .iter()
                    .filter(|p| p.hour == hour)
                    .map(|p| p.congestion_score),
            )
            .map(|avg| HourlyCongestion {
                hour,
                avg_congestion: avg.round() as u32,
            })
        })
        .collect()
}

pub fn trend_summary(store: &HistoricalStore) -> TrendSummary {
    let averages = hourly_averages(store);
    let Some(first) = averages.first().copied() else {
        return TrendSummary::default();
    };

    // Strict comparisons keep the earliest hour on ties.
    let busiest = averages.iter().fold(first, |best, h| {
        if h.avg_congestion > best.avg_congestion { *h } else { best }
    });
    let quietest = averages.iter().fold(first, |best, h| {
        if h.avg_congestion < best.avg_congestion { *h } else { best }
    });

    let delays: Vec<f64> = store
        .points()
        .iter()
        .map(|p| f64::from(p.avg_delay_minutes))
        .collect();
    let congestion: Vec<f64> = store
        .points()
        .iter()
        .map(|p| f64::from(p.congestion_score))
        .collect();

    let spread = stddev(&congestion, mean(&congestion));
    let reliability = (100.0 - spread / 2.0).clamp(0.0, 100.0);

    TrendSummary {
        busiest,
        quietest,
        average_delay: mean(&delays).round() as u32,
        reliability_score: reliability.round() as u32,
    }
}
