//! Owned store for the hourly history with a rolling retention window.

use chrono::{Duration, Local, NaiveDate};
use tracing::{debug, info};

use crate::config::HistoryCalibration;
use crate::history::generator::generate_series;
use crate::history::types::{HistoricalTrendPoint, HourlyObservation};
use crate::random::RandomSource;

/// Owns the trailing window of hourly history.
///
/// Points are appended and pruned by a single writer; readers borrow
/// [`HistoricalStore::points`].
#[derive(Debug, Clone)]
pub struct HistoricalStore {
    points: Vec<HistoricalTrendPoint>,
    retention_days: i64,
}

impl Default for HistoricalStore {
    fn default() -> Self {
        Self::new(HistoryCalibration::default().retention_days)
    }
}

impl HistoricalStore {
    /// An empty store keeping `retention_days` of history.
    pub fn new(retention_days: i64) -> Self {
        Self {
            points: Vec::new(),
            retention_days,
        }
    }

    /// A store seeded with existing points. No pruning is applied.
    pub fn with_points(points: Vec<HistoricalTrendPoint>, retention_days: i64) -> Self {
        Self {
            points,
            retention_days,
        }
    }

    /// Generates the synthetic baseline ending the day before `today`.
    pub fn generate(
        today: NaiveDate,
        calibration: &HistoryCalibration,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let points = generate_series(today, calibration, rng);
        info!(
            points = points.len(),
            days = calibration.retention_days,
            "Historical baseline generated"
        );
        Self::with_points(points, calibration.retention_days)
    }

    pub fn points(&self) -> &[HistoricalTrendPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn retention_days(&self) -> i64 {
        self.retention_days
    }

    /// Points dated within the trailing `days` days of `today`.
    pub fn recent(&self, days: i64, today: NaiveDate) -> Vec<&HistoricalTrendPoint> {
        let cutoff = today - Duration::days(days);
        self.points.iter().filter(|p| p.date >= cutoff).collect()
    }

    /// Records `observation` against the current local date.
    pub fn add_historical_data_point(&mut self, observation: HourlyObservation) {
        self.add_observation_on(observation, Local::now().date_naive());
    }

    /// Records `observation` against `today`, then prunes the window.
    pub fn add_observation_on(&mut self, observation: HourlyObservation, today: NaiveDate) {
        let point = observation.at(today);
        debug!(
            date = %point.date,
            hour = point.hour,
            congestion = point.congestion_score,
            "Recording historical observation"
        );
        self.points.push(point);
        self.prune(today);
    }

    /// Drops every point older than the retention window. Returns how many were removed.
    pub fn prune(&mut self, today: NaiveDate) -> usize {
        let cutoff = today - Duration::days(self.retention_days);
        let before = self.points.len();
        self.points.retain(|p| p.date >= cutoff);
        let removed = before - self.points.len();
        if removed > 0 {
            debug!(removed, cutoff = %cutoff, "Pruned historical points");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::StdRandom;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn observation(hour: u32) -> HourlyObservation {
        HourlyObservation {
            hour,
            flight_count: 40,
            avg_delay_minutes: 10,
            congestion_score: 62,
            parking_occupancy: 75,
            weather_condition: None,
            special_event: false,
        }
    }

    #[test]
    fn test_generate_fills_window() {
        let today = ymd(2025, 10, 1);
        let mut rng = StdRandom::seeded(3);
        let store = HistoricalStore::generate(today, &HistoryCalibration::default(), &mut rng);
        assert_eq!(store.len(), 2160);
        assert_eq!(store.retention_days(), 90);
    }

    #[test]
    fn test_add_stamps_date_and_day_of_week() {
        let mut store = HistoricalStore::default();
        // 2025-03-05 is a Wednesday.
        store.add_observation_on(observation(9), ymd(2025, 3, 5));

        let point = &store.points()[0];
        assert_eq!(point.date, ymd(2025, 3, 5));
        assert_eq!(point.day_of_week, 3);
        assert_eq!(point.hour, 9);
    }

    #[test]
    fn test_add_prunes_old_points() {
        let today = ymd(2025, 10, 1);
        let mut rng = StdRandom::seeded(5);
        let mut store = HistoricalStore::generate(today, &HistoryCalibration::default(), &mut rng);

        // A week later the first seven generated days fall out of the window.
        let later = ymd(2025, 10, 8);
        store.add_observation_on(observation(12), later);

        let cutoff = later - Duration::days(90);
        assert!(store.points().iter().all(|p| p.date >= cutoff));
        assert_eq!(store.len(), 2160 - 7 * 24 + 1);
    }

    #[test]
    fn test_recent_filters_by_date() {
        let mut store = HistoricalStore::new(90);
        store.add_observation_on(observation(1), ymd(2025, 3, 1));
        store.add_observation_on(observation(2), ymd(2025, 3, 20));
        store.add_observation_on(observation(3), ymd(2025, 3, 28));

        let recent = store.recent(7, ymd(2025, 3, 28));
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].hour, 3);
        assert_eq!(store.recent(30, ymd(2025, 3, 28)).len(), 3);
    }

    #[test]
    fn test_prune_on_empty_store() {
        let mut store = HistoricalStore::default();
        assert_eq!(store.prune(ymd(2025, 1, 1)), 0);
        assert!(store.is_empty());
    }
}
