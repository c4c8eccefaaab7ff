// Ground transport entries: rental cars, buses, trains, ferries and transfers.

use crate::duration::parse_duration;
use crate::plan::{RawTransport, RawTransportSegment};
use crate::summary::{TransportKind, TransportSummary};
use tracing::debug;

// Transport entries for the plan, priced in `currency` unless an entry says otherwise.
pub fn normalize_transport(transport: &RawTransport, currency: &str) -> Vec<TransportSummary> {
    let entries: Vec<RawTransportSegment> = match transport.segments.as_ref() {
        Some(segments) if !segments.is_empty() => segments.clone(),
        _ => {
            let merged = match transport.data.as_ref() {
                Some(data) => transport.fields.overlay(data),
                None => transport.fields.clone(),
            };
            vec![merged]
        }
    };

    entries
        .iter()
        .filter_map(|entry| summarize_entry(entry, currency))
        .collect()
}

fn summarize_entry(entry: &RawTransportSegment, currency: &str) -> Option<TransportSummary> {
    let route = entry.route.clone().or_else(|| match (&entry.from, &entry.to) {
        (Some(from), Some(to)) => Some(format!("{} → {}", from, to)),
        _ => None,
    });
    let provider = entry.provider.clone().or_else(|| entry.company.clone());
    let price = entry.price.or(entry.price_amount);

    if entry.kind.is_none() && route.is_none() && provider.is_none() && price.is_none() {
        debug!("skipping transport entry with nothing to show");
        return None;
    }

    let seconds = entry.duration.as_deref().map_or(0, parse_duration);

    Some(TransportSummary {
        kind: entry
            .kind
            .as_deref()
            .map_or(TransportKind::Other, TransportKind::parse),
        route,
        provider,
        duration_seconds: (seconds > 0).then_some(seconds),
        distance: entry.distance.clone(),
        price,
        price_per_day: entry.price_per_day,
        currency: entry
            .currency
            .clone()
            .unwrap_or_else(|| currency.to_string()),
    })
}
