//! Congestion expectation for an (hour, day-of-week) pair.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::analyzers::utility::{mean, mean_score, stddev};
use crate::config::TrendWeights;
use crate::history::{HistoricalStore, HistoricalTrendPoint};

/// Signals that feed the blended prediction, rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendFactors {
    /// Mean congestion of matching (hour, day-of-week) points.
    pub historical_pattern: i32,
    /// Mean congestion of every point on the same day of week.
    pub day_of_week_trend: i32,
    /// Mean congestion of matching points from the recent window.
    pub seasonal_factor: i32,
    /// Special-event mean minus the historical pattern. May be negative.
    pub special_event_impact: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysisResult {
    /// 0–100.
    pub predicted_congestion: u32,
    /// 0.5–0.95.
    pub confidence: f64,
    pub factors: TrendFactors,
    pub recommendation: String,
}

impl TrendAnalysisResult {
    /// Result returned when no history matches the query.
    pub fn typical() -> Self {
        Self {
            predicted_congestion: 50,
            confidence: 0.6,
            factors: TrendFactors {
                historical_pattern: 50,
                day_of_week_trend: 50,
                seasonal_factor: 50,
                special_event_impact: 0,
            },
            recommendation: "Moderate congestion expected based on typical patterns.".to_string(),
        }
    }
}

/// Predicts congestion at `hour` on `day_of_week` (Sunday = 0) from the store.
///
/// Reads only; calling twice on the same store and `today` returns the same result.
pub fn analyze_trend_for_hour(
    store: &HistoricalStore,
    hour: u32,
    day_of_week: u32,
    today: NaiveDate,
    weights: &TrendWeights,
) -> TrendAnalysisResult {
    let points = store.points();
    let similar: Vec<&HistoricalTrendPoint> = points
        .iter()
        .filter(|p| p.hour == hour && p.day_of_week == day_of_week)
        .collect();

    if similar.is_empty() {
        return TrendAnalysisResult::typical();
    }

    let scores: Vec<f64> = similar
        .iter()
        .map(|p| f64::from(p.congestion_score))
        .collect();
    let historical = mean(&scores);
    let spread = stddev(&scores, historical);

    let day_trend = mean_score(
        points
            .iter()
            .filter(|p| p.day_of_week == day_of_week)
            .map(|p| p.congestion_score),
    )
    .unwrap_or(historical);

    let cutoff = today - Duration::days(weights.recent_window_days);
    let seasonal = mean_score(
        similar
            .iter()
            .filter(|p| p.date >= cutoff)
            .map(|p| p.congestion_score),
    )
    .unwrap_or(historical);

    let event_impact = mean_score(
        similar
            .iter()
            .filter(|p| p.special_event)
            .map(|p| p.congestion_score),
    )
    .map_or(0.0, |event_mean| event_mean - historical);

    let blended = historical * weights.historical
        + seasonal * weights.recent
        + day_trend * weights.day_of_week
        + event_impact * weights.special_event;
    let predicted_congestion = blended.round().clamp(0.0, 100.0) as u32;

    let confidence = (1.0 - spread / 50.0).clamp(0.5, 0.95);

    TrendAnalysisResult {
        predicted_congestion,
        confidence,
        factors: TrendFactors {
            historical_pattern: historical.round() as i32,
            day_of_week_trend: day_trend.round() as i32,
            seasonal_factor: seasonal.round() as i32,
            special_event_impact: event_impact.round() as i32,
        },
        recommendation: recommendation(predicted_congestion, confidence),
    }
}

pub fn confidence_label(confidence: f64) -> &'static str {
    if confidence >= 0.8 {
        "High confidence"
    } else if confidence > 0.6 {
        "Medium confidence"
    } else {
        "Low confidence"
    }
}

/// Travel advice for a predicted congestion score.
pub fn recommendation(congestion: u32, confidence: f64) -> String {
    let advice = match congestion {
        c if c < 30 => "Light traffic expected. Great time to travel.",
        c if c < 60 => "Moderate congestion expected. Allow extra time.",
        _ => "Heavy congestion expected. Consider alternative times.",
    };
    format!("{}: {}", confidence_label(confidence), advice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HistoryCalibration;
    use crate::random::StdRandom;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(date: NaiveDate, hour: u32, score: u32, special_event: bool) -> HistoricalTrendPoint {
        HistoricalTrendPoint {
            date,
            hour,
            day_of_week: crate::history::calendar::day_of_week(date),
            flight_count: score * 65 / 100,
            avg_delay_minutes: 10,
            congestion_score: score,
            parking_occupancy: 70,
            weather_condition: None,
            special_event,
        }
    }

    #[test]
    fn test_empty_store_returns_typical_result() {
        let store = HistoricalStore::default();
        let result = analyze_trend_for_hour(&store, 8, 1, ymd(2025, 3, 31), &TrendWeights::default());

        assert_eq!(result, TrendAnalysisResult::typical());
        assert_eq!(result.predicted_congestion, 50);
        assert_eq!(result.confidence, 0.6);
    }

    #[test]
    fn test_blended_prediction() {
        // Mondays in March 2025: 3, 10, 17, 24, 31.
        let store = HistoricalStore::with_points(
            vec![
                point(ymd(2025, 3, 3), 8, 40, false),
                point(ymd(2025, 3, 10), 8, 60, false),
                point(ymd(2025, 3, 24), 8, 80, true),
                point(ymd(2025, 3, 10), 12, 20, false),
                // Tuesday at the same hour is ignored.
                point(ymd(2025, 3, 4), 8, 100, false),
            ],
            90,
        );

        let result =
            analyze_trend_for_hour(&store, 8, 1, ymd(2025, 3, 31), &TrendWeights::default());

        assert_eq!(
            result.factors,
            TrendFactors {
                historical_pattern: 60,
                day_of_week_trend: 50,
                seasonal_factor: 80,
                special_event_impact: 20,
            }
        );
        // 60*0.4 + 80*0.3 + 50*0.2 + 20*0.1
        assert_eq!(result.predicted_congestion, 60);

        let expected_confidence = 1.0 - (800.0_f64 / 3.0).sqrt() / 50.0;
        assert!((result.confidence - expected_confidence).abs() < 1e-9);
        assert_eq!(
            result.recommendation,
            "Medium confidence: Heavy congestion expected. Consider alternative times."
        );
    }

    #[test]
    fn test_no_recent_points_falls_back_to_historical() {
        let store = HistoricalStore::with_points(
            vec![
                point(ymd(2025, 3, 3), 14, 20, false),
                point(ymd(2025, 3, 10), 14, 20, false),
            ],
            90,
        );

        let result =
            analyze_trend_for_hour(&store, 14, 1, ymd(2025, 5, 1), &TrendWeights::default());

        assert_eq!(result.factors.seasonal_factor, 20);
        assert_eq!(result.factors.special_event_impact, 0);
        // 20*0.4 + 20*0.3 + 20*0.2
        assert_eq!(result.predicted_congestion, 18);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(
            result.recommendation,
            "High confidence: Light traffic expected. Great time to travel."
        );
    }

    #[test]
    fn test_confidence_floor() {
        let store = HistoricalStore::with_points(
            vec![
                point(ymd(2025, 3, 3), 6, 0, false),
                point(ymd(2025, 3, 10), 6, 100, false),
            ],
            90,
        );

        let result =
            analyze_trend_for_hour(&store, 6, 1, ymd(2025, 3, 12), &TrendWeights::default());
        assert_eq!(result.confidence, 0.5);
        assert!(result.recommendation.starts_with("Low confidence"));
    }

    #[test]
    fn test_generated_history_bounds_and_idempotence() {
        let today = ymd(2025, 9, 30);
        let mut rng = StdRandom::seeded(21);
        let store = HistoricalStore::generate(today, &HistoryCalibration::default(), &mut rng);
        let weights = TrendWeights::default();

        for day in 0..7 {
            for hour in 0..24 {
                let first = analyze_trend_for_hour(&store, hour, day, today, &weights);
                let second = analyze_trend_for_hour(&store, hour, day, today, &weights);
                assert_eq!(first, second);
                assert!(first.predicted_congestion <= 100);
                assert!((0.5..=0.95).contains(&first.confidence));
            }
        }
    }

    #[test]
    fn test_confidence_labels() {
        assert_eq!(confidence_label(0.95), "High confidence");
        assert_eq!(confidence_label(0.8), "High confidence");
        assert_eq!(confidence_label(0.79), "Medium confidence");
        assert_eq!(confidence_label(0.6), "Low confidence");
    }

    #[test]
    fn test_recommendation_bands() {
        assert!(recommendation(29, 0.9).contains("Light traffic"));
        assert!(recommendation(30, 0.9).contains("Moderate congestion"));
        assert!(recommendation(59, 0.9).contains("Moderate congestion"));
        assert!(recommendation(60, 0.9).contains("Heavy congestion"));
    }
}
