// Hotel segment grouping. Several line items may describe the same stay
// (split bookings, per-night rows); they collapse into one entry here.

use crate::plan::{RawHotel, RawHotelSegment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedHotel {
    pub hotel_name: Option<String>,
    pub city: Option<String>,
    pub nights: u32,
    pub board_type: Option<String>,
    pub address: Option<String>,
    pub total_price: Option<f64>,
    pub currency: Option<String>,
}

impl RawHotel {
    // Price of the whole hotel block, shared by the stay list and the trip total.
    pub fn amount(&self) -> Option<f64> {
        self.total_price.or(self.price_total)
    }
}

impl RawHotelSegment {
    // Segment price: `price_total`, then `price`.
    pub fn amount(&self) -> Option<f64> {
        self.price_total.or(self.price)
    }

    // City shown for the stay: `cityCode`, then `city`.
    pub fn city_label(&self) -> Option<&str> {
        self.city_code.as_deref().or(self.city.as_deref())
    }
}

// Line items for a hotel block: its `segments` when non-empty, otherwise the
// flat hotel fields as one item when they name a hotel.
pub fn hotel_segments(hotel: &RawHotel) -> Vec<RawHotelSegment> {
    if let Some(segments) = hotel.segments.as_ref().filter(|s| !s.is_empty()) {
        return segments
            .iter()
            .cloned()
            .map(|mut segment| {
                if segment.currency.is_none() {
                    segment.currency = hotel.currency.clone();
                }
                segment
            })
            .collect();
    }

    if hotel.hotel_name.is_none() {
        return Vec::new();
    }

    vec![RawHotelSegment {
        hotel_name: hotel.hotel_name.clone(),
        city_code: hotel.city_code.clone(),
        city: hotel.city.clone(),
        nights: hotel.nights,
        board_type: hotel.board_type.clone(),
        address: hotel.address.clone(),
        price_total: hotel.amount(),
        price: hotel.price,
        currency: hotel.currency.clone(),
    }]
}

// `hotelName-cityCode`, falling back to `city` and then to an empty city part.
pub fn grouping_key(segment: &RawHotelSegment) -> String {
    format!(
        "{}-{}",
        segment.hotel_name.as_deref().unwrap_or_default(),
        segment.city_label().unwrap_or_default()
    )
}

// Merge line items that share a grouping key, in first-seen order.
pub fn group(segments: &[RawHotelSegment]) -> Vec<GroupedHotel> {
    let mut grouped: Vec<GroupedHotel> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for segment in segments {
        let key = grouping_key(segment);
        match positions.get(&key).copied() {
            Some(position) => {
                debug!(key = %key, "merging repeated hotel line item");
                let existing = &mut grouped[position];
                existing.nights = existing.nights.saturating_add(segment.nights.unwrap_or(0));
                existing.total_price = match (existing.total_price, segment.amount()) {
                    (Some(a), Some(b)) => Some(a + b),
                    (a, b) => a.or(b),
                };
            }
            None => {
                positions.insert(key, grouped.len());
                grouped.push(GroupedHotel {
                    hotel_name: segment.hotel_name.clone(),
                    city: segment.city_label().map(str::to_string),
                    nights: segment.nights.unwrap_or(0),
                    board_type: segment.board_type.clone(),
                    address: segment.address.clone(),
                    total_price: segment.amount(),
                    currency: segment.currency.clone(),
                });
            }
        }
    }

    grouped
}
