//! Synthetic 90-day hourly baseline.
//!
//! No real historical store exists, so the baseline is generated from a fixed
//! hourly base load shaped by calendar multipliers, a weather penalty and
//! jitter. The draw order per point is fixed: weather event, weather kind (only
//! on an event), jitter, delay, parking.

use chrono::{Duration, NaiveDate};

use crate::config::HistoryCalibration;
use crate::history::calendar::{day_of_week, is_peak_travel, is_weekend_peak};
use crate::history::types::{HistoricalTrendPoint, WeatherCondition, congestion_from_flights};
use crate::random::RandomSource;

/// Generates `retention_days` days of hourly points ending the day before `today`.
pub fn generate_series(
    today: NaiveDate,
    calibration: &HistoryCalibration,
    rng: &mut dyn RandomSource,
) -> Vec<HistoricalTrendPoint> {
    let days = calibration.retention_days.max(0);
    let start = today - Duration::days(days);

    let mut points = Vec::with_capacity(days as usize * 24);
    for offset in 0..days {
        let date = start + Duration::days(offset);
        for hour in 0..24 {
            points.push(synthesize_point(date, hour, calibration, rng));
        }
    }
    points
}

/// Synthesizes one point for `date` at `hour`.
pub fn synthesize_point(
    date: NaiveDate,
    hour: u32,
    calibration: &HistoryCalibration,
    rng: &mut dyn RandomSource,
) -> HistoricalTrendPoint {
    let dow = day_of_week(date);
    let mut flights = f64::from(calibration.hourly_base_load[(hour % 24) as usize]);

    if is_weekend_peak(dow) {
        flights *= calibration.weekend_multiplier;
    }
    if dow == 1 {
        flights *= calibration.monday_multiplier;
    }

    let special_event = is_peak_travel(date, calibration);
    if special_event {
        flights *= calibration.peak_travel_multiplier;
    }

    let mut weather = WeatherCondition::Clear;
    if rng.chance(calibration.weather_event_probability) {
        weather = if rng.chance(calibration.rain_share) {
            WeatherCondition::Rain
        } else {
            WeatherCondition::Fog
        };
        flights *= calibration.weather_penalty;
    }

    let jitter = rng.uniform(1.0 - calibration.jitter, 1.0 + calibration.jitter);
    let flight_count = (flights * jitter).round().max(0.0) as u32;

    let congestion_score =
        congestion_from_flights(flight_count, calibration.flights_at_full_congestion);
    let avg_delay_minutes = delay_for_congestion(congestion_score, rng);
    let parking_occupancy = (40.0 + f64::from(congestion_score) * 0.5 + rng.uniform(0.0, 20.0))
        .round()
        .clamp(0.0, 100.0) as u32;

    HistoricalTrendPoint {
        date,
        hour: hour % 24,
        day_of_week: dow,
        flight_count,
        avg_delay_minutes,
        congestion_score,
        parking_occupancy,
        weather_condition: Some(weather),
        special_event,
    }
}

/// Average delay drawn from the band keyed by congestion score.
///
/// | Congestion | Delay (min) |
/// |------------|-------------|
/// | > 70       | 15–34       |
/// | > 40       | 5–19        |
/// | otherwise  | 0–7         |
pub fn delay_for_congestion(congestion_score: u32, rng: &mut dyn RandomSource) -> u32 {
    match congestion_score {
        c if c > 70 => 15 + rng.below(20),
        c if c > 40 => 5 + rng.below(15),
        _ => rng.below(8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedSequence, StdRandom};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_series_shape() {
        let today = ymd(2025, 10, 15);
        let mut rng = StdRandom::seeded(7);
        let points = generate_series(today, &HistoryCalibration::default(), &mut rng);

        assert_eq!(points.len(), 90 * 24);
        assert_eq!(points.first().unwrap().date, ymd(2025, 7, 17));
        assert_eq!(points.last().unwrap().date, ymd(2025, 10, 14));
        assert_eq!(points.last().unwrap().hour, 23);
        for p in &points {
            assert!(p.congestion_score <= 100);
            assert!(p.parking_occupancy <= 100);
            assert!(p.hour < 24);
            assert!(p.day_of_week < 7);
        }
    }

    #[test]
    fn test_congestion_follows_flight_count() {
        let mut rng = StdRandom::seeded(11);
        let calibration = HistoryCalibration::default();
        for p in generate_series(ymd(2025, 4, 1), &calibration, &mut rng) {
            assert_eq!(
                p.congestion_score,
                congestion_from_flights(p.flight_count, 65.0)
            );
        }
    }

    #[test]
    fn test_plain_tuesday_without_jitter() {
        // 0.5 everywhere: no weather event, jitter factor exactly 1.0 when jitter is 0.
        let calibration = HistoryCalibration {
            jitter: 0.0,
            ..HistoryCalibration::default()
        };
        let mut rng = FixedSequence::constant(0.5);
        // 2025-03-04 is a Tuesday outside any peak window.
        let point = synthesize_point(ymd(2025, 3, 4), 8, &calibration, &mut rng);

        assert_eq!(point.flight_count, 52);
        assert_eq!(point.congestion_score, 80);
        assert_eq!(point.avg_delay_minutes, 25);
        assert_eq!(point.parking_occupancy, 90);
        assert_eq!(point.weather_condition, Some(WeatherCondition::Clear));
        assert!(!point.special_event);
    }

    #[test]
    fn test_multipliers_compose() {
        let calibration = HistoryCalibration {
            jitter: 0.0,
            hourly_base_load: [20; 24],
            ..HistoryCalibration::default()
        };
        let mut rng = FixedSequence::constant(0.5);
        // 2025-07-04 is a Friday in the July peak: 20 * 1.15 * 1.25 = 28.75.
        let point = synthesize_point(ymd(2025, 7, 4), 23, &calibration, &mut rng);

        assert_eq!(point.flight_count, 29);
        assert!(point.special_event);
    }

    #[test]
    fn test_weather_penalty_applies_once() {
        let calibration = HistoryCalibration {
            jitter: 0.0,
            hourly_base_load: [50; 24],
            ..HistoryCalibration::default()
        };
        // Event draw 0.05 (< 0.1), kind draw 0.9 (fog), then 0.5 for the rest.
        let mut rng = FixedSequence::new(vec![0.05, 0.9, 0.5, 0.5, 0.5]);
        let point = synthesize_point(ymd(2025, 3, 4), 12, &calibration, &mut rng);

        assert_eq!(point.weather_condition, Some(WeatherCondition::Fog));
        assert_eq!(point.flight_count, 35);
    }

    #[test]
    fn test_delay_bands() {
        let mut low = FixedSequence::constant(0.0);
        assert_eq!(delay_for_congestion(71, &mut low), 15);
        assert_eq!(delay_for_congestion(41, &mut low), 5);
        assert_eq!(delay_for_congestion(40, &mut low), 0);

        let mut high = FixedSequence::constant(0.999_999);
        assert_eq!(delay_for_congestion(100, &mut high), 34);
        assert_eq!(delay_for_congestion(70, &mut high), 19);
        assert_eq!(delay_for_congestion(10, &mut high), 7);
    }
}
