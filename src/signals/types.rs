//! Normalized records produced by the signal sources.

use serde::{Deserialize, Serialize};

/// A departing flight as reported by the flight source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    #[serde(default)]
    pub flight_number: String,
    pub destination: String,
    /// "On Time", "Delayed 20m", "Cancelled", ...
    pub status: String,
    #[serde(default)]
    pub delay_minutes: Option<u32>,
}

/// A parking lot. Capacity fields are optional because some lots only
/// publish a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingLot {
    pub location: String,
    #[serde(default)]
    pub available_spaces: Option<u32>,
    #[serde(default)]
    pub total_spaces: Option<u32>,
}

impl ParkingLot {
    /// Occupied share of the lot in `[0, 1]`, if capacity data is present.
    pub fn occupancy(&self) -> Option<f64> {
        let available = f64::from(self.available_spaces?);
        let total = f64::from(self.total_spaces.filter(|t| *t > 0)?);
        Some((1.0 - available / total).clamp(0.0, 1.0))
    }
}

/// Conditions on a route to the airport. `description` is free text scanned
/// for incident keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficCondition {
    pub route: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Departure-board metrics derived from the flight signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightMetrics {
    pub on_time_percentage: u32,
    /// Minutes.
    pub average_delay: u32,
    pub cancellations: u32,
}

impl Default for FlightMetrics {
    /// Typical airport-wide values shown when no flights are reported.
    fn default() -> Self {
        Self {
            on_time_percentage: 78,
            average_delay: 18,
            cancellations: 5,
        }
    }
}

impl FlightMetrics {
    /// `average_delay` covers delayed flights only and is 0 when none are delayed.
    pub fn from_flights(flights: &[FlightRecord]) -> Self {
        if flights.is_empty() {
            return Self::default();
        }

        let total = flights.len() as f64;
        let on_time = flights.iter().filter(|f| f.status == "On Time").count();
        let cancellations = flights.iter().filter(|f| f.status == "Cancelled").count();

        let delays: Vec<u64> = flights
            .iter()
            .filter_map(|f| f.delay_minutes)
            .filter(|d| *d > 0)
            .map(u64::from)
            .collect();
        let average_delay = if delays.is_empty() {
            0
        } else {
            (delays.iter().sum::<u64>() as f64 / delays.len() as f64).round() as u32
        };

        Self {
            on_time_percentage: (on_time as f64 / total * 100.0).round() as u32,
            average_delay,
            cancellations: cancellations as u32,
        }
    }
}

/// Mean delay in minutes across every flight, counting missing delays as 0.
pub fn mean_delay(flights: &[FlightRecord]) -> f64 {
    if flights.is_empty() {
        return 0.0;
    }
    let total: u64 = flights
        .iter()
        .map(|f| u64::from(f.delay_minutes.unwrap_or(0)))
        .sum();
    total as f64 / flights.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(status: &str, delay: Option<u32>) -> FlightRecord {
        FlightRecord {
            flight_number: "AA100".to_string(),
            destination: "ORD".to_string(),
            status: status.to_string(),
            delay_minutes: delay,
        }
    }

    #[test]
    fn test_parking_occupancy() {
        let full = ParkingLot {
            location: "Terminal A".to_string(),
            available_spaces: Some(0),
            total_spaces: Some(100),
        };
        assert_eq!(full.occupancy(), Some(1.0));

        let missing = ParkingLot {
            location: "Remote".to_string(),
            available_spaces: None,
            total_spaces: Some(100),
        };
        assert_eq!(missing.occupancy(), None);

        let zero_capacity = ParkingLot {
            location: "Closed".to_string(),
            available_spaces: Some(0),
            total_spaces: Some(0),
        };
        assert_eq!(zero_capacity.occupancy(), None);
    }

    #[test]
    fn test_flight_metrics_defaults_when_empty() {
        assert_eq!(FlightMetrics::from_flights(&[]), FlightMetrics::default());
    }

    #[test]
    fn test_flight_metrics_from_flights() {
        let flights = vec![
            flight("On Time", Some(0)),
            flight("On Time", None),
            flight("Delayed 30m", Some(30)),
            flight("Cancelled", None),
        ];
        let metrics = FlightMetrics::from_flights(&flights);
        assert_eq!(metrics.on_time_percentage, 50);
        assert_eq!(metrics.average_delay, 30);
        assert_eq!(metrics.cancellations, 1);
    }

    #[test]
    fn test_average_delay_is_zero_without_delays() {
        let flights = vec![flight("On Time", Some(0)), flight("On Time", None)];
        assert_eq!(FlightMetrics::from_flights(&flights).average_delay, 0);
    }

    #[test]
    fn test_flight_metrics_default_values() {
        let metrics = FlightMetrics::default();
        assert_eq!(
            (metrics.on_time_percentage, metrics.average_delay, metrics.cancellations),
            (78, 18, 5)
        );
    }

    #[test]
    fn test_large_delays_do_not_overflow() {
        let flights = vec![
            flight("Delayed", Some(u32::MAX)),
            flight("Delayed", Some(u32::MAX)),
            flight("Delayed 1m", Some(1)),
        ];
        let metrics = FlightMetrics::from_flights(&flights);
        assert!(metrics.average_delay > 0);
        assert!(mean_delay(&flights) > f64::from(u32::MAX) / 2.0);
        assert_eq!(mean_delay(&[]), 0.0);
    }

    #[test]
    fn test_records_deserialize_with_missing_fields() {
        let lot: ParkingLot = serde_json::from_str(r#"{"location":"Express North"}"#).unwrap();
        assert_eq!(lot.available_spaces, None);

        let flight: FlightRecord =
            serde_json::from_str(r#"{"destination":"LAX","status":"On Time"}"#).unwrap();
        assert_eq!(flight.delay_minutes, None);

        let traffic: TrafficCondition = serde_json::from_str(
            r#"{"route":"I-30 to DFW","description":"Major construction on I-30"}"#,
        )
        .unwrap();
        assert_eq!(traffic.description.as_deref(), Some("Major construction on I-30"));
    }
}
