//! Live signal sources consumed by the forecast engine.
//!
//! Each source produces a normalized list of records. Sources may return
//! empty lists or fail; [`SignalSources::fetch_all`] joins all three
//! concurrently and reports which ones failed.

pub mod http;
pub mod simulated;
pub mod types;

pub use types::{FlightMetrics, FlightRecord, ParkingLot, TrafficCondition, mean_delay};

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::fetch::BasicClient;
use http::JsonFeed;
use simulated::{SimulatedFlights, SimulatedParking, SimulatedTraffic};

/// An external provider of one category of live data.
#[async_trait::async_trait]
pub trait SignalSource: Send + Sync {
    type Record: Send;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Vec<Self::Record>>;
}

pub type FlightSource = Arc<dyn SignalSource<Record = FlightRecord>>;
pub type ParkingSource = Arc<dyn SignalSource<Record = ParkingLot>>;
pub type TrafficSource = Arc<dyn SignalSource<Record = TrafficCondition>>;

/// Records gathered in one fetch round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signals {
    pub flights: Vec<FlightRecord>,
    pub parking: Vec<ParkingLot>,
    pub traffic: Vec<TrafficCondition>,
}

/// Result of a fetch round: failed sources contribute empty lists.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub signals: Signals,
    pub failed: Vec<&'static str>,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The three sources the forecast engine reads from.
#[derive(Clone)]
pub struct SignalSources {
    pub flights: FlightSource,
    pub parking: ParkingSource,
    pub traffic: TrafficSource,
}

impl std::fmt::Debug for SignalSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalSources")
            .field("flights", &self.flights.name())
            .field("parking", &self.parking.name())
            .field("traffic", &self.traffic.name())
            .finish()
    }
}

impl SignalSources {
    pub fn new(flights: FlightSource, parking: ParkingSource, traffic: TrafficSource) -> Self {
        Self {
            flights,
            parking,
            traffic,
        }
    }

    /// Canned airport data for every signal.
    pub fn simulated() -> Self {
        Self::new(
            Arc::new(SimulatedFlights),
            Arc::new(SimulatedParking),
            Arc::new(SimulatedTraffic),
        )
    }

    /// JSON feeds for every configured URL, simulators for the rest.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut sources = Self::simulated();

        if let Some(url) = &settings.flight_feed_url {
            info!(url = %url, "Using HTTP flight feed");
            sources.flights = Arc::new(JsonFeed::new("flights", url, http_client()?));
        }
        if let Some(url) = &settings.parking_feed_url {
            info!(url = %url, "Using HTTP parking feed");
            sources.parking = Arc::new(JsonFeed::new("parking", url, http_client()?));
        }
        if let Some(url) = &settings.traffic_feed_url {
            info!(url = %url, "Using HTTP traffic feed");
            sources.traffic = Arc::new(JsonFeed::new("traffic", url, http_client()?));
        }

        Ok(sources)
    }

    /// Fetches all signals concurrently and waits for every one to settle.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_all(&self) -> FetchOutcome {
        let (flights, parking, traffic) = tokio::join!(
            self.flights.fetch(),
            self.parking.fetch(),
            self.traffic.fetch()
        );

        let mut failed = Vec::new();
        let signals = Signals {
            flights: settle(self.flights.name(), flights, &mut failed),
            parking: settle(self.parking.name(), parking, &mut failed),
            traffic: settle(self.traffic.name(), traffic, &mut failed),
        };

        FetchOutcome { signals, failed }
    }
}

fn http_client() -> Result<BasicClient> {
    BasicClient::with_timeout(Duration::from_secs(30))
}

fn settle<T>(
    source: &'static str,
    result: Result<Vec<T>>,
    failed: &mut Vec<&'static str>,
) -> Vec<T> {
    match result {
        Ok(records) => {
            debug!(source, records = records.len(), "Signal fetched");
            records
        }
        Err(e) => {
            warn!(source, error = %e, "Signal source failed");
            failed.push(source);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    #[async_trait::async_trait]
    impl SignalSource for Broken {
        type Record = ParkingLot;

        fn name(&self) -> &'static str {
            "broken-parking"
        }

        async fn fetch(&self) -> Result<Vec<ParkingLot>> {
            Err(anyhow::anyhow!("lot sensor offline"))
        }
    }

    #[tokio::test]
    async fn test_fetch_all_simulated_is_complete() {
        let outcome = SignalSources::simulated().fetch_all().await;
        assert!(outcome.is_complete());
        assert!(!outcome.signals.flights.is_empty());
        assert!(!outcome.signals.parking.is_empty());
        assert!(!outcome.signals.traffic.is_empty());
    }

    #[tokio::test]
    async fn test_failed_source_is_reported_and_emptied() {
        let mut sources = SignalSources::simulated();
        sources.parking = Arc::new(Broken);

        let outcome = sources.fetch_all().await;
        assert_eq!(outcome.failed, vec!["broken-parking"]);
        assert!(outcome.signals.parking.is_empty());
        assert!(!outcome.signals.flights.is_empty());
    }

    #[test]
    fn test_from_settings_without_urls_is_simulated() {
        let sources = SignalSources::from_settings(&Settings::default()).unwrap();
        assert_eq!(sources.flights.name(), "simulated-flights");
        assert_eq!(sources.parking.name(), "simulated-parking");
        assert_eq!(sources.traffic.name(), "simulated-traffic");
    }

    #[test]
    fn test_from_settings_with_url_uses_feed() {
        let settings = Settings {
            traffic_feed_url: Some("http://localhost:9/traffic.json".to_string()),
            ..Settings::default()
        };
        let sources = SignalSources::from_settings(&settings).unwrap();
        assert_eq!(sources.traffic.name(), "traffic");
        assert_eq!(sources.flights.name(), "simulated-flights");
    }
}
