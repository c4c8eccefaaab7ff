// Raw trip plan payloads as they arrive from the upstream search/booking service.
// The schema has drifted across versions, so every field is optional and
// decoded leniently; precedence between alternate locations is resolved by
// the component modules, never here.

use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawPlan {
    #[serde(deserialize_with = "lenient::or_none")]
    pub flight: Option<RawFlight>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub hotel: Option<RawHotel>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub transport: Option<RawTransport>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub price_breakdown: Option<RawPriceBreakdown>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_price: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub summary: Option<RawPlanSummary>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
    // Alternatives offered alongside the chosen plan, used for option counts.
    #[serde(deserialize_with = "lenient::or_none")]
    pub travel: Option<RawTravelOptions>,
    pub accommodation: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawFlight {
    #[serde(deserialize_with = "lenient::list")]
    pub segments: Option<Vec<RawSegment>>,
    #[serde(deserialize_with = "lenient::list")]
    pub outbound: Option<Vec<RawSegment>>,
    #[serde(deserialize_with = "lenient::list")]
    pub inbound: Option<Vec<RawSegment>>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_price: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub price_total: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

// A flight segment in either of the two shapes the upstream service has used.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawSegment {
    Amadeus(AmadeusSegment),
    Flat(FlatSegment),
}

// Newer offers nest endpoints: {"departure": {"iataCode", "at"}, ...}.
// `departure` and `arrival` are required so flat segments never match here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AmadeusSegment {
    pub departure: AmadeusEndpoint,
    pub arrival: AmadeusEndpoint,
    #[serde(
        rename = "carrierCode",
        default,
        deserialize_with = "lenient::text"
    )]
    pub carrier_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_none")]
    pub aircraft: Option<AmadeusAircraft>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AmadeusEndpoint {
    #[serde(rename = "iataCode", deserialize_with = "lenient::text")]
    pub iata_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AmadeusAircraft {
    #[serde(deserialize_with = "lenient::text")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlatSegment {
    #[serde(deserialize_with = "lenient::text")]
    pub from: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub to: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub carrier: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub flight_number: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub aircraft_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub depart_at: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub arrive_at: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub depart_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub arrive_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub arrive_plus: Option<String>,
}

// Canonical flight segment every component works from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub from: Option<String>,
    pub to: Option<String>,
    pub carrier: Option<String>,
    pub flight_number: Option<String>,
    pub aircraft_code: Option<String>,
    // ISO-8601 subset, e.g. `PT2H30M`.
    pub duration: Option<String>,
    pub depart_at: Option<String>,
    pub arrive_at: Option<String>,
    pub depart_time: Option<String>,
    pub arrive_time: Option<String>,
    // Day rollover marker such as `+1`.
    pub arrive_plus: Option<String>,
}

impl From<RawSegment> for Segment {
    fn from(item: RawSegment) -> Self {
        match item {
            RawSegment::Flat(flat) => Segment {
                from: flat.from,
                to: flat.to,
                carrier: flat.carrier,
                flight_number: flat.flight_number,
                aircraft_code: flat.aircraft_code,
                duration: flat.duration,
                depart_at: flat.depart_at,
                arrive_at: flat.arrive_at,
                depart_time: flat.depart_time,
                arrive_time: flat.arrive_time,
                arrive_plus: flat.arrive_plus,
            },
            RawSegment::Amadeus(offer) => Segment {
                from: offer.departure.iata_code,
                to: offer.arrival.iata_code,
                carrier: offer.carrier_code,
                flight_number: offer.number,
                aircraft_code: offer.aircraft.and_then(|a| a.code),
                duration: offer.duration,
                depart_at: offer.departure.at,
                arrive_at: offer.arrival.at,
                ..Segment::default()
            },
        }
    }
}

// Resolve a raw segment list into canonical segments.
pub fn canonical_segments(raw: &[RawSegment]) -> Vec<Segment> {
    raw.iter().cloned().map(Segment::from).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawHotel {
    #[serde(deserialize_with = "lenient::list")]
    pub segments: Option<Vec<RawHotelSegment>>,
    #[serde(rename = "hotelName", deserialize_with = "lenient::text")]
    pub hotel_name: Option<String>,
    #[serde(rename = "cityCode", deserialize_with = "lenient::text")]
    pub city_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::whole")]
    pub nights: Option<u32>,
    #[serde(rename = "boardType", deserialize_with = "lenient::text")]
    pub board_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub total_price: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub price_total: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawHotelSegment {
    #[serde(rename = "hotelName", deserialize_with = "lenient::text")]
    pub hotel_name: Option<String>,
    #[serde(rename = "cityCode", deserialize_with = "lenient::text")]
    pub city_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::whole")]
    pub nights: Option<u32>,
    #[serde(rename = "boardType", deserialize_with = "lenient::text")]
    pub board_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub price_total: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawTransport {
    #[serde(deserialize_with = "lenient::list")]
    pub segments: Option<Vec<RawTransportSegment>>,
    #[serde(deserialize_with = "lenient::or_none")]
    pub data: Option<RawTransportSegment>,
    // Flat fields share the segment layout.
    #[serde(flatten)]
    pub fields: RawTransportSegment,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawTransportSegment {
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub route: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub from: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub to: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub distance: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub provider: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub price_amount: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub price_per_day: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

impl RawTransportSegment {
    // Fill every absent field from `fallback`, keeping fields already present.
    pub fn overlay(&self, fallback: &RawTransportSegment) -> RawTransportSegment {
        RawTransportSegment {
            kind: self.kind.clone().or_else(|| fallback.kind.clone()),
            route: self.route.clone().or_else(|| fallback.route.clone()),
            from: self.from.clone().or_else(|| fallback.from.clone()),
            to: self.to.clone().or_else(|| fallback.to.clone()),
            duration: self.duration.clone().or_else(|| fallback.duration.clone()),
            distance: self.distance.clone().or_else(|| fallback.distance.clone()),
            provider: self.provider.clone().or_else(|| fallback.provider.clone()),
            company: self.company.clone().or_else(|| fallback.company.clone()),
            price: self.price.or(fallback.price),
            price_amount: self.price_amount.or(fallback.price_amount),
            price_per_day: self.price_per_day.or(fallback.price_per_day),
            currency: self.currency.clone().or_else(|| fallback.currency.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawPriceBreakdown {
    #[serde(deserialize_with = "lenient::number")]
    pub flight: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub hotel: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub transport: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub car: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawPlanSummary {
    #[serde(deserialize_with = "lenient::number")]
    pub total_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawTravelOptions {
    #[serde(deserialize_with = "lenient::or_none")]
    pub flights: Option<RawFlightOptions>,
    pub ground_transport: Option<Value>,
    pub accommodation: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RawFlightOptions {
    pub outbound: Option<Value>,
    pub inbound: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amadeus_and_flat_segments_resolve_to_same_shape() {
        let flight: RawFlight = serde_json::from_value(json!({
            "segments": [
                {
                    "departure": { "iataCode": "BKK", "at": "2025-03-01T08:00:00" },
                    "arrival": { "iataCode": "HKG", "at": "2025-03-01T11:45:00" },
                    "carrierCode": "CX",
                    "number": "616",
                    "aircraft": { "code": "333" },
                    "duration": "PT2H45M"
                },
                {
                    "from": "HKG",
                    "to": "NRT",
                    "carrier": "CX",
                    "flight_number": "CX500",
                    "depart_time": "13:10",
                    "arrive_time": "18:30",
                    "duration": "PT4H20M"
                }
            ]
        }))
        .unwrap();

        let segments = canonical_segments(flight.segments.as_deref().unwrap());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].from.as_deref(), Some("BKK"));
        assert_eq!(segments[0].to.as_deref(), Some("HKG"));
        assert_eq!(segments[0].aircraft_code.as_deref(), Some("333"));
        assert_eq!(segments[0].depart_at.as_deref(), Some("2025-03-01T08:00:00"));
        assert_eq!(segments[1].from.as_deref(), Some("HKG"));
        assert_eq!(segments[1].arrive_time.as_deref(), Some("18:30"));
    }

    #[test]
    fn test_mistyped_sections_become_absent() {
        let plan: RawPlan = serde_json::from_value(json!({
            "flight": "none",
            "hotel": { "hotelName": "Siam Kempinski", "nights": "two" },
            "total_price": "12,500",
            "currency": ""
        }))
        .unwrap();

        assert!(plan.flight.is_none());
        let hotel = plan.hotel.unwrap();
        assert_eq!(hotel.hotel_name.as_deref(), Some("Siam Kempinski"));
        assert_eq!(hotel.nights, None);
        assert_eq!(plan.total_price, Some(12500.0));
        assert_eq!(plan.currency, None);
    }

    #[test]
    fn test_transport_flat_fields_and_data_block() {
        let transport: RawTransport = serde_json::from_value(json!({
            "type": "car_rental",
            "price_per_day": 900,
            "data": { "distance": 145, "company": "Avis" }
        }))
        .unwrap();

        assert_eq!(transport.fields.kind.as_deref(), Some("car_rental"));
        assert_eq!(transport.fields.price_per_day, Some(900.0));
        let merged = transport
            .fields
            .overlay(transport.data.as_ref().unwrap());
        assert_eq!(merged.distance.as_deref(), Some("145"));
        assert_eq!(merged.company.as_deref(), Some("Avis"));
        assert_eq!(merged.kind.as_deref(), Some("car_rental"));
    }
}
