use chrono::{Duration, Local, NaiveDateTime, Timelike};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

use super::scoring::{
    composite_score, estimate_flight_count, fallback_bar_height, flight_traffic_score,
    parking_pressure_score, traffic_score,
};
use super::types::{CongestionForecastEntry, Forecast, ForecastBasis};
use crate::config::Calibration;
use crate::random::RandomSource;
use crate::signals::{FetchOutcome, SignalSources, Signals};

/// How bar heights are produced for a forecast run.
#[derive(Debug, Clone, Copy)]
pub enum ForecastMode<'a> {
    /// Scored from live signals.
    Live(&'a Signals),
    /// Time-of-day rule only.
    Fallback,
}

impl ForecastMode<'_> {
    pub fn basis(&self) -> ForecastBasis {
        match self {
            Self::Live(_) => ForecastBasis::Live,
            Self::Fallback => ForecastBasis::Fallback,
        }
    }
}

/// Builds the rolling hourly forecast from the signal sources.
pub struct ForecastEngine {
    sources: SignalSources,
    calibration: Calibration,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl ForecastEngine {
    pub fn new(
        sources: SignalSources,
        calibration: Calibration,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            sources,
            calibration,
            rng: Mutex::new(rng),
        }
    }

    pub fn sources(&self) -> &SignalSources {
        &self.sources
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Fetches every signal and forecasts from the current local hour.
    ///
    /// Never fails: a failed source switches the run to the fallback rule.
    #[tracing::instrument(skip(self))]
    pub async fn generate_congestion_forecast(&self) -> Vec<CongestionForecastEntry> {
        let outcome = self.sources.fetch_all().await;
        self.forecast_from(&outcome, Local::now().naive_local())
            .entries
    }

    /// Picks the mode for a fetch outcome and forecasts from `now`.
    pub fn forecast_from(&self, outcome: &FetchOutcome, now: NaiveDateTime) -> Forecast {
        let mode = if outcome.is_complete() {
            ForecastMode::Live(&outcome.signals)
        } else {
            warn!(
                failed = ?outcome.failed,
                "Signal fetch failed, using time-of-day fallback"
            );
            ForecastMode::Fallback
        };

        self.forecast(mode, now)
    }

    /// One entry per hour starting at `now`'s hour, for the configured horizon.
    pub fn forecast(&self, mode: ForecastMode<'_>, now: NaiveDateTime) -> Forecast {
        let forecast = &self.calibration.forecast;
        let base_load = &self.calibration.history.hourly_base_load;

        // Parking and traffic pressure do not vary by hour.
        let pressure = match mode {
            ForecastMode::Live(signals) => Some((
                parking_pressure_score(&signals.parking),
                traffic_score(&signals.traffic),
            )),
            ForecastMode::Fallback => None,
        };

        let mut guard = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let rng: &mut dyn RandomSource = guard.as_mut();

        let start = now.with_minute(0).unwrap_or(now);
        let entries: Vec<CongestionForecastEntry> = (0..forecast.horizon_hours)
            .map(|offset| {
                let slot = start + Duration::hours(i64::from(offset));
                let hour = slot.hour();

                let bar_height = match (mode, pressure) {
                    (ForecastMode::Live(signals), Some((parking, traffic))) => composite_score(
                        flight_traffic_score(hour, &signals.flights),
                        parking,
                        traffic,
                        forecast,
                    ),
                    _ => fallback_bar_height(hour, rng),
                };
                let flight_count =
                    estimate_flight_count(hour, base_load, forecast.flight_count_jitter, rng);

                CongestionForecastEntry::new(hour, slot.date(), bar_height, flight_count)
            })
            .collect();

        debug!(
            basis = %mode.basis(),
            entries = entries.len(),
            start_hour = start.hour(),
            "Forecast built"
        );

        Forecast {
            basis: mode.basis(),
            entries,
        }
    }
}
