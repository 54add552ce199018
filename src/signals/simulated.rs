//! Canned airport data used when no live feed is configured.

use anyhow::Result;
use async_trait::async_trait;

use super::SignalSource;
use super::types::{FlightRecord, ParkingLot, TrafficCondition};

pub struct SimulatedFlights;

pub struct SimulatedParking;

pub struct SimulatedTraffic;

fn flight(number: &str, destination: &str, delay: u32, cancelled: bool) -> FlightRecord {
    let status = if cancelled {
        "Cancelled".to_string()
    } else if delay == 0 {
        "On Time".to_string()
    } else {
        format!("Delayed {delay}m")
    };

    FlightRecord {
        flight_number: number.to_string(),
        destination: destination.to_string(),
        status,
        delay_minutes: Some(delay),
    }
}

fn lot(location: &str, available: u32, total: u32) -> ParkingLot {
    ParkingLot {
        location: location.to_string(),
        available_spaces: Some(available),
        total_spaces: Some(total),
    }
}

fn route(route: &str, status: &str, description: Option<&str>) -> TrafficCondition {
    TrafficCondition {
        route: route.to_string(),
        status: status.to_string(),
        description: description.map(str::to_string),
    }
}

#[async_trait]
impl SignalSource for SimulatedFlights {
    type Record = FlightRecord;

    fn name(&self) -> &'static str {
        "simulated-flights"
    }

    async fn fetch(&self) -> Result<Vec<FlightRecord>> {
        Ok(vec![
            flight("AA1234", "Los Angeles (LAX)", 0, false),
            flight("AA2156", "Chicago (ORD)", 15, false),
            flight("AA891", "New York (JFK)", 0, false),
            flight("AA3421", "Miami (MIA)", 45, false),
            flight("AA567", "Denver (DEN)", 0, false),
            flight("AA2890", "Phoenix (PHX)", 0, true),
        ])
    }
}

#[async_trait]
impl SignalSource for SimulatedParking {
    type Record = ParkingLot;

    fn name(&self) -> &'static str {
        "simulated-parking"
    }

    async fn fetch(&self) -> Result<Vec<ParkingLot>> {
        Ok(vec![
            lot("Terminal A", 6, 85),
            lot("Terminal B", 0, 92),
            lot("Terminal C", 23, 78),
            lot("Terminal D", 4, 105),
            lot("Terminal E", 31, 88),
            lot("Express North", 140, 450),
            lot("Express South", 210, 520),
            lot("Remote South", 600, 1200),
        ])
    }
}

#[async_trait]
impl SignalSource for SimulatedTraffic {
    type Record = TrafficCondition;

    fn name(&self) -> &'static str {
        "simulated-traffic"
    }

    async fn fetch(&self) -> Result<Vec<TrafficCondition>> {
        Ok(vec![
            route(
                "I-635 to DFW",
                "Heavy Traffic",
                Some("Construction lane closures between Belt Line Rd and DFW exits"),
            ),
            route(
                "I-35E to DFW",
                "Moderate Delays",
                Some("Slow traffic near Terminal A/B exits"),
            ),
            route("Highway 121 to DFW", "Free Flow", None),
            route("State Highway 114 to DFW", "Light Traffic", None),
            route(
                "I-30 to DFW",
                "Heavy Traffic",
                Some("Major construction on I-30 eastbound near DFW exits"),
            ),
        ])
    }
}
