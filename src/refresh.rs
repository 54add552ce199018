//! Periodic dashboard refresh.
//!
//! Each refresh fetches the live signals, rebuilds the forecast, feeds the
//! current hour back into the historical store and publishes a
//! [`DashboardSnapshot`]. [`RefreshService::run`] drives it on a timer, one
//! spawned task per tick, with an in-flight guard so slow sources never stack
//! up overlapping refreshes.

use chrono::{DateTime, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{Instrument, debug, error, info};

use crate::analyzers::{TrendAnalysisResult, TrendSummary, analyze_trend_for_hour, trend_summary};
use crate::forecast::scoring::parking_pressure_score;
use crate::forecast::{CongestionForecastEntry, Forecast, ForecastBasis, ForecastEngine, TravelWindows};
use crate::history::calendar::{day_of_week, is_peak_travel};
use crate::history::types::congestion_from_flights;
use crate::history::{HistoricalStore, HourlyObservation};
use crate::output::write_json;
use crate::signals::{FlightMetrics, Signals, mean_delay};

/// Everything the dashboard shows after one refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Local>,
    pub mode: ForecastBasis,
    pub forecast: Vec<CongestionForecastEntry>,
    pub travel_windows: TravelWindows,
    pub trend_summary: TrendSummary,
    pub current_trend: TrendAnalysisResult,
    pub flight_metrics: FlightMetrics,
}

pub struct RefreshService {
    engine: ForecastEngine,
    store: Arc<RwLock<HistoricalStore>>,
    latest: RwLock<Option<DashboardSnapshot>>,
    in_flight: AtomicBool,
    learn_from_live: bool,
    snapshot_path: Option<String>,
}

/// Clears the in-flight flag when the refresh ends, even on panic.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl RefreshService {
    pub fn new(
        engine: ForecastEngine,
        store: Arc<RwLock<HistoricalStore>>,
        learn_from_live: bool,
    ) -> Self {
        Self {
            engine,
            store,
            latest: RwLock::new(None),
            in_flight: AtomicBool::new(false),
            learn_from_live,
            snapshot_path: None,
        }
    }

    /// Also write every snapshot to `path` as JSON.
    pub fn with_snapshot_path(mut self, path: impl Into<String>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn store(&self) -> Arc<RwLock<HistoricalStore>> {
        Arc::clone(&self.store)
    }

    pub async fn latest(&self) -> Option<DashboardSnapshot> {
        self.latest.read().await.clone()
    }

    /// Runs one refresh for the current local time.
    ///
    /// Returns `None` without doing anything if another refresh is still running.
    pub async fn refresh(&self) -> Option<DashboardSnapshot> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!("Refresh already in flight, skipping");
            return None;
        }
        let _guard = InFlight(&self.in_flight);

        Some(self.refresh_at(Local::now()).await)
    }

    /// Runs one refresh as if the clock read `now`.
    #[tracing::instrument(skip_all, fields(now = %now))]
    pub async fn refresh_at(&self, now: DateTime<Local>) -> DashboardSnapshot {
        let outcome = self.engine.sources().fetch_all().await;
        let forecast = self.engine.forecast_from(&outcome, now.naive_local());
        let today = now.date_naive();

        if forecast.basis == ForecastBasis::Live && self.learn_from_live {
            self.learn(&outcome.signals, &forecast, today).await;
        }

        let calibration = self.engine.calibration();
        let (trend_summary, current_trend) = {
            let store = self.store.read().await;
            (
                trend_summary(&store),
                analyze_trend_for_hour(
                    &store,
                    now.hour(),
                    day_of_week(today),
                    today,
                    &calibration.trend,
                ),
            )
        };

        let snapshot = DashboardSnapshot {
            generated_at: now,
            mode: forecast.basis,
            travel_windows: TravelWindows::from_forecast(&forecast.entries),
            forecast: forecast.entries,
            trend_summary,
            current_trend,
            flight_metrics: FlightMetrics::from_flights(&outcome.signals.flights),
        };

        info!(
            mode = %snapshot.mode,
            entries = snapshot.forecast.len(),
            predicted = snapshot.current_trend.predicted_congestion,
            busiest_hour = snapshot.trend_summary.busiest.hour,
            "Dashboard refreshed"
        );

        if let Some(path) = &self.snapshot_path {
            if let Err(e) = write_json(path, &snapshot) {
                error!(path = %path, error = %e, "Failed to write snapshot");
            }
        }

        *self.latest.write().await = Some(snapshot.clone());
        snapshot
    }

    /// Appends the current hour from live signals, once per (date, hour).
    async fn learn(&self, signals: &Signals, forecast: &Forecast, today: NaiveDate) {
        let Some(current) = forecast.entries.first() else {
            return;
        };

        let mut store = self.store.write().await;
        if store
            .points()
            .iter()
            .any(|p| p.date == today && p.hour == current.hour)
        {
            debug!(hour = current.hour, "Hour already recorded, not learning");
            return;
        }

        let history = &self.engine.calibration().history;
        let observation = HourlyObservation {
            hour: current.hour,
            flight_count: current.flight_count,
            avg_delay_minutes: mean_delay(&signals.flights).round() as u32,
            congestion_score: congestion_from_flights(
                current.flight_count,
                history.flights_at_full_congestion,
            ),
            parking_occupancy: parking_pressure_score(&signals.parking),
            weather_condition: None,
            special_event: is_peak_travel(today, history),
        };
        store.add_observation_on(observation, today);
    }

    /// Refreshes once after `warmup`, then every `interval`, forever.
    ///
    /// Each tick is spawned so a slow refresh never delays the timer.
    pub async fn run(self: Arc<Self>, warmup: Duration, interval: Duration) {
        info!(
            warmup_secs = warmup.as_secs_f64(),
            interval_secs = interval.as_secs_f64(),
            "Starting refresh loop"
        );
        tokio::time::sleep(warmup).await;

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut tick: u64 = 0;
        loop {
            ticker.tick().await;
            tick += 1;

            let service = Arc::clone(&self);
            let span = tracing::info_span!("refresh_tick", tick);
            tokio::spawn(
                async move {
                    if service.refresh().await.is_none() {
                        info!("Previous refresh still running, tick skipped");
                    }
                }
                .instrument(span),
            );
        }
    }
}
