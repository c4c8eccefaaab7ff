// Option-count reconciliation for validation banners.
//
// Two independent sources report how many alternatives exist per category:
// the cache/validation subsystem and a recount over the plan itself. The
// cache wins whenever it has anything to say.

use crate::lenient;
use crate::plan::RawPlan;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionCounts {
    #[serde(alias = "flights_outbound", deserialize_with = "lenient::count")]
    pub flights_outbound: u32,
    #[serde(alias = "flights_inbound", deserialize_with = "lenient::count")]
    pub flights_inbound: u32,
    #[serde(alias = "ground_transport", deserialize_with = "lenient::count")]
    pub ground_transport: u32,
    #[serde(deserialize_with = "lenient::count")]
    pub accommodation: u32,
}

impl OptionCounts {
    pub fn total(&self) -> u64 {
        [
            self.flights_outbound,
            self.flights_inbound,
            self.ground_transport,
            self.accommodation,
        ]
        .iter()
        .map(|&n| u64::from(n))
        .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountSource {
    Cache,
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReconciledCounts {
    #[serde(flatten)]
    pub counts: OptionCounts,
    pub source: CountSource,
}

// Entries behind a value: array length, `1` for any other truthy value, `0` otherwise.
pub fn count_entries(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Array(items)) => u32::try_from(items.len()).unwrap_or(u32::MAX),
        Some(Value::Null) | None => 0,
        Some(Value::Bool(flag)) => u32::from(*flag),
        Some(Value::Number(n)) => u32::from(n.as_f64().is_some_and(|v| v != 0.0)),
        Some(Value::String(s)) => u32::from(!s.is_empty()),
        Some(Value::Object(_)) => 1,
    }
}

// Recount options from the plan.
pub fn derive_counts(plan: &RawPlan) -> OptionCounts {
    let travel = plan.travel.as_ref();
    let flights = travel.and_then(|t| t.flights.as_ref());

    OptionCounts {
        flights_outbound: count_entries(flights.and_then(|f| f.outbound.as_ref())),
        flights_inbound: count_entries(flights.and_then(|f| f.inbound.as_ref())),
        ground_transport: count_entries(travel.and_then(|t| t.ground_transport.as_ref())),
        accommodation: count_entries(
            travel
                .and_then(|t| t.accommodation.as_ref())
                .or(plan.accommodation.as_ref()),
        ),
    }
}

// Prefer the cache summary when any of its counts is non-zero.
pub fn reconcile(cache: Option<&OptionCounts>, derived: OptionCounts) -> ReconciledCounts {
    match cache {
        Some(counts) if counts.total() > 0 => ReconciledCounts {
            counts: *counts,
            source: CountSource::Cache,
        },
        _ => {
            debug!(
                cache_present = cache.is_some(),
                "cache option counts empty, using counts derived from plan"
            );
            ReconciledCounts {
                counts: derived,
                source: CountSource::Derived,
            }
        }
    }
}
