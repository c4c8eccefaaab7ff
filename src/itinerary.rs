// Itinerary normalizer: resolves flight payloads of any known shape into
// per-leg summaries.

use crate::allocation::{allocate, allocate_by_seconds};
use crate::duration::{checked_total, segment_seconds};
use crate::engine::EngineConfig;
use crate::plan::{canonical_segments, RawFlight, RawPlan, Segment};
use crate::reference::{aircraft_name_with, airline_name};
use crate::summary::{LegDirection, LegSummary, SegmentSummary};
use crate::timing::{layovers, total_journey};
use tracing::debug;

// Currency for the whole plan.
//
// Precedence: `price_breakdown.currency`, `plan.currency`, `flight.currency`,
// `hotel.currency`, then `default_currency`.
pub fn resolve_currency(plan: &RawPlan, default_currency: &str) -> String {
    plan.price_breakdown
        .as_ref()
        .and_then(|b| b.currency.clone())
        .or_else(|| plan.currency.clone())
        .or_else(|| plan.flight.as_ref().and_then(|f| f.currency.clone()))
        .or_else(|| plan.hotel.as_ref().and_then(|h| h.currency.clone()))
        .unwrap_or_else(|| default_currency.to_string())
}

// Flight price: `total_price`, `price_total`, then `price`.
pub fn flight_total(flight: &RawFlight) -> Option<f64> {
    flight.total_price.or(flight.price_total).or(flight.price)
}

// Split into directed legs. Outbound/inbound arrays win over a flat `segments` list.
pub fn detect_legs(flight: &RawFlight) -> Vec<(LegDirection, Vec<Segment>)> {
    if flight.outbound.is_some() || flight.inbound.is_some() {
        debug!("flight payload uses outbound/inbound legs");
        return [
            (LegDirection::Outbound, &flight.outbound),
            (LegDirection::Inbound, &flight.inbound),
        ]
        .into_iter()
        .filter_map(|(direction, raw)| {
            raw.as_deref()
                .filter(|segments| !segments.is_empty())
                .map(|segments| (direction, canonical_segments(segments)))
        })
        .collect();
    }

    match flight.segments.as_deref() {
        Some(segments) if !segments.is_empty() => {
            debug!("flight payload uses a single segment list");
            vec![(LegDirection::Single, canonical_segments(segments))]
        }
        _ => Vec::new(),
    }
}

// Normalize the plan's flight into leg summaries; empty when there is no flight.
pub fn normalize(plan: &RawPlan, config: &EngineConfig) -> Vec<LegSummary> {
    let Some(flight) = plan.flight.as_ref() else {
        return Vec::new();
    };

    let legs = detect_legs(flight);
    let leg_prices = leg_prices(flight_total(flight), &legs);

    legs.into_iter()
        .zip(leg_prices)
        .map(|((direction, segments), price)| build_leg(direction, &segments, price, config))
        .collect()
}

// A lone leg carries the whole flight price; two legs split it by flown time.
fn leg_prices(total: Option<f64>, legs: &[(LegDirection, Vec<Segment>)]) -> Vec<Option<f64>> {
    if legs.len() <= 1 {
        return vec![total; legs.len()];
    }

    let leg_seconds: Vec<i64> = legs
        .iter()
        .map(|(_, segments)| {
            checked_total(segments.iter().map(|s| segment_seconds(s.duration.as_deref())))
                .unwrap_or(0)
        })
        .collect();
    allocate_by_seconds(total, &leg_seconds)
}

// Ordered carrier codes with repeats removed, first occurrence kept.
pub fn unique_carriers(segments: &[Segment]) -> Vec<String> {
    let mut carriers: Vec<String> = Vec::new();
    for carrier in segments.iter().filter_map(|s| s.carrier.as_ref()) {
        if !carriers.contains(carrier) {
            carriers.push(carrier.clone());
        }
    }
    carriers
}

pub fn route(segments: &[Segment]) -> Option<String> {
    let from = segments.first()?.from.as_deref()?;
    let to = segments.last()?.to.as_deref()?;
    Some(format!("{} → {}", from, to))
}

fn depart_display(segments: &[Segment]) -> Option<String> {
    let first = segments.first()?;
    first.depart_time.clone().or_else(|| first.depart_at.clone())
}

fn arrive_display(segments: &[Segment]) -> Option<String> {
    let last = segments.last()?;
    let shown = last.arrive_time.clone().or_else(|| last.arrive_at.clone())?;
    match last.arrive_plus.as_deref().map(str::trim) {
        Some(plus) if !plus.is_empty() => Some(format!("{} {}", shown, plus)),
        _ => Some(shown),
    }
}

fn build_leg(
    direction: LegDirection,
    segments: &[Segment],
    total_price: Option<f64>,
    config: &EngineConfig,
) -> LegSummary {
    let shares = allocate(total_price, segments);
    let gaps = layovers(segments);

    let segment_summaries = segments
        .iter()
        .zip(shares)
        .zip(gaps)
        .enumerate()
        .map(|(index, ((segment, allocated_price), layover))| {
            let seconds = segment_seconds(segment.duration.as_deref());
            SegmentSummary {
                index,
                from: segment.from.clone(),
                to: segment.to.clone(),
                flight_number: segment.flight_number.clone(),
                carrier_name: segment.carrier.as_deref().map(airline_name),
                aircraft_name: segment
                    .aircraft_code
                    .as_deref()
                    .map(|code| aircraft_name_with(code, &config.aircraft_fallback)),
                duration_seconds: (seconds > 0).then_some(seconds),
                allocated_price,
                layover_seconds_to_next: layover,
            }
        })
        .collect();

    LegSummary {
        direction,
        route: route(segments),
        stop_count: segments.len().saturating_sub(1),
        carriers: unique_carriers(segments),
        depart_display: depart_display(segments),
        arrive_display: arrive_display(segments),
        total_duration_seconds: total_journey(segments),
        total_price,
        segments: segment_summaries,
    }
}
