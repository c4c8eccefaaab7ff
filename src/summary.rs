// Canonical itinerary summary handed to presentation layers.

use crate::hotel::GroupedHotel;
use crate::options::ReconciledCounts;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySummary {
    pub currency: String,
    pub legs: Vec<LegSummary>,
    pub hotels: Vec<GroupedHotel>,
    pub transport: Vec<TransportSummary>,
    pub price_breakdown: PriceBreakdown,
    pub option_counts: ReconciledCounts,
}

impl ItinerarySummary {
    // Summary with no content, used when the input is not a plan at all.
    pub fn empty(currency: &str, option_counts: ReconciledCounts) -> Self {
        Self {
            currency: currency.to_string(),
            legs: Vec::new(),
            hotels: Vec::new(),
            transport: Vec::new(),
            price_breakdown: PriceBreakdown {
                currency: currency.to_string(),
                ..PriceBreakdown::default()
            },
            option_counts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegDirection {
    Outbound,
    Inbound,
    Single,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegSummary {
    pub direction: LegDirection,
    pub route: Option<String>,
    pub stop_count: usize,
    pub carriers: Vec<String>,
    pub depart_display: Option<String>,
    pub arrive_display: Option<String>,
    pub total_duration_seconds: Option<i64>,
    pub total_price: Option<f64>,
    pub segments: Vec<SegmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSummary {
    pub index: usize,
    pub from: Option<String>,
    pub to: Option<String>,
    pub flight_number: Option<String>,
    pub carrier_name: Option<String>,
    pub aircraft_name: Option<String>,
    pub duration_seconds: Option<i64>,
    pub allocated_price: Option<f64>,
    pub layover_seconds_to_next: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    CarRental,
    Bus,
    Train,
    Metro,
    Ferry,
    Transfer,
    Other,
}

impl TransportKind {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "car_rental" => TransportKind::CarRental,
            "bus" => TransportKind::Bus,
            "train" => TransportKind::Train,
            "metro" => TransportKind::Metro,
            "ferry" => TransportKind::Ferry,
            "transfer" => TransportKind::Transfer,
            _ => TransportKind::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportSummary {
    #[serde(rename = "type")]
    pub kind: TransportKind,
    pub route: Option<String>,
    pub provider: Option<String>,
    pub duration_seconds: Option<i64>,
    pub distance: Option<String>,
    pub price: Option<f64>,
    pub price_per_day: Option<f64>,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub flight: Option<f64>,
    pub hotel: Option<f64>,
    pub transport: Option<f64>,
    pub car: Option<f64>,
    pub total: Option<f64>,
    pub currency: String,
}
