//! Per-signal congestion scores, each on a 0–100 scale.
//!
//! Every scorer has a numeric default for missing data, so an empty signal
//! never stops the forecast.

use crate::config::ForecastCalibration;
use crate::random::RandomSource;
use crate::signals::{FlightRecord, ParkingLot, TrafficCondition, mean_delay};

/// Typical departure-board pressure for an hour of the day.
///
/// | Hours        | Score |
/// |--------------|-------|
/// | 6–9          | 85    |
/// | 16–20        | 90    |
/// | 10–15        | 55    |
/// | 22–23, 0–5   | 20    |
/// | 21           | 40    |
pub fn hour_base_score(hour: u32) -> u32 {
    match hour % 24 {
        6..=9 => 85,
        16..=20 => 90,
        10..=15 => 55,
        22..=23 | 0..=5 => 20,
        _ => 40,
    }
}

/// Hour-of-day score raised by the mean live delay (+15 over 30 min, +8 over 15 min).
pub fn flight_traffic_score(hour: u32, flights: &[FlightRecord]) -> u32 {
    let mut score = hour_base_score(hour);

    if !flights.is_empty() {
        let delay = mean_delay(flights);
        if delay > 30.0 {
            score += 15;
        } else if delay > 15.0 {
            score += 8;
        }
    }

    score.min(100)
}

/// Mean occupied share across lots reporting capacity; 50 when none do.
pub fn parking_pressure_score(lots: &[ParkingLot]) -> u32 {
    let occupancies: Vec<f64> = lots.iter().filter_map(ParkingLot::occupancy).collect();
    if occupancies.is_empty() {
        return 50;
    }

    let mean = occupancies.iter().sum::<f64>() / occupancies.len() as f64;
    (mean * 100.0).round().clamp(0.0, 100.0) as u32
}

/// 30 plus 25 per construction report and 15 per delay/slow report, capped at 100.
pub fn traffic_score(conditions: &[TrafficCondition]) -> u32 {
    if conditions.is_empty() {
        return 30;
    }

    let descriptions: Vec<String> = conditions
        .iter()
        .filter_map(|c| c.description.as_deref())
        .map(str::to_lowercase)
        .collect();

    let construction = descriptions
        .iter()
        .filter(|d| d.contains("construction"))
        .count() as u32;
    let delays = descriptions
        .iter()
        .filter(|d| d.contains("delay") || d.contains("slow"))
        .count() as u32;

    (30 + construction * 25 + delays * 15).min(100)
}

/// Weighted blend of the three signal scores.
pub fn composite_score(
    flight: u32,
    parking: u32,
    traffic: u32,
    calibration: &ForecastCalibration,
) -> u32 {
    let blended = f64::from(flight) * calibration.flight_weight
        + f64::from(parking) * calibration.parking_weight
        + f64::from(traffic) * calibration.traffic_weight;
    blended.round().clamp(0.0, 100.0) as u32
}

/// Bar height when live signals are unavailable: a peak/off-peak rule.
///
/// Peak hours (6–8, 17–20) draw from 75–99, every other hour from 15–39.
pub fn fallback_bar_height(hour: u32, rng: &mut dyn RandomSource) -> u32 {
    if is_fallback_peak(hour) {
        75 + rng.below(25)
    } else {
        15 + rng.below(25)
    }
}

pub fn is_fallback_peak(hour: u32) -> bool {
    matches!(hour % 24, 6..=8 | 17..=20)
}

/// Estimated operations in `hour`: base load plus `-jitter..jitter`, floored at 0.
pub fn estimate_flight_count(
    hour: u32,
    base_load: &[u32; 24],
    jitter: u32,
    rng: &mut dyn RandomSource,
) -> u32 {
    let base = i64::from(base_load[(hour % 24) as usize]);
    let variation = i64::from(rng.below(jitter * 2)) - i64::from(jitter);
    (base + variation).max(0) as u32
}
