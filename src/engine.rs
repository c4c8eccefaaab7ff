// Summary processor: the single entry point presentation layers call on every render.

use crate::duration::{format_duration, DurationInput, DurationLabels};
use crate::hotel::{group, hotel_segments};
use crate::itinerary::{normalize, resolve_currency};
use crate::options::{derive_counts, reconcile, OptionCounts};
use crate::plan::RawPlan;
use crate::pricing::price_breakdown;
use crate::reference::DEFAULT_AIRCRAFT_FALLBACK;
use crate::summary::ItinerarySummary;
use crate::transport::normalize_transport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

// Error types for the string boundary; data-shape problems never surface here
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    // Last resort of the plan currency precedence.
    pub default_currency: String,
    pub duration_labels: DurationLabels,
    // Template for unknown aircraft codes; `{code}` is replaced.
    pub aircraft_fallback: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_currency: "THB".to_string(),
            duration_labels: DurationLabels::default(),
            aircraft_fallback: DEFAULT_AIRCRAFT_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SummaryProcessor {
    config: EngineConfig,
}

impl SummaryProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // Build the canonical summary for a plan snapshot.
    pub fn summarize(
        &self,
        plan: &RawPlan,
        cache_counts: Option<&OptionCounts>,
    ) -> ItinerarySummary {
        let currency = resolve_currency(plan, &self.config.default_currency);

        let legs = normalize(plan, &self.config);

        let hotels: Vec<_> = plan
            .hotel
            .as_ref()
            .map(|hotel| group(&hotel_segments(hotel)))
            .unwrap_or_default()
            .into_iter()
            .map(|mut stay| {
                stay.currency.get_or_insert_with(|| currency.clone());
                stay
            })
            .collect();

        let transport = plan
            .transport
            .as_ref()
            .map(|t| normalize_transport(t, &currency))
            .unwrap_or_default();

        let price_breakdown = price_breakdown(plan, &currency);
        let option_counts = reconcile(cache_counts, derive_counts(plan));

        let summary = ItinerarySummary {
            currency,
            legs,
            hotels,
            transport,
            price_breakdown,
            option_counts,
        };

        debug!(
            legs = summary.legs.len(),
            hotels = summary.hotels.len(),
            transport = summary.transport.len(),
            total = ?summary.price_breakdown.total,
            "built itinerary summary"
        );

        summary
    }

    // Summarize an arbitrary JSON value. Anything but an object yields an empty summary.
    pub fn summarize_value(
        &self,
        value: &Value,
        cache_counts: Option<&OptionCounts>,
    ) -> ItinerarySummary {
        if !value.is_object() {
            warn!("plan payload is not an object, returning empty summary");
            return self.empty_summary(cache_counts);
        }

        match serde_json::from_value::<RawPlan>(value.clone()) {
            Ok(plan) => self.summarize(&plan, cache_counts),
            Err(e) => {
                warn!(error = %e, "plan payload could not be read, returning empty summary");
                self.empty_summary(cache_counts)
            }
        }
    }

    // Parse a JSON document and summarize it.
    pub fn summarize_json(
        &self,
        json_str: &str,
        cache_counts: Option<&OptionCounts>,
    ) -> Result<ItinerarySummary, ProcessingError> {
        let value: Value = serde_json::from_str(json_str)
            .map_err(|e| ProcessingError::JsonParseError(e.to_string()))?;
        Ok(self.summarize_value(&value, cache_counts))
    }

    pub fn to_json(&self, summary: &ItinerarySummary) -> Result<String, ProcessingError> {
        serde_json::to_string(summary).map_err(|e| ProcessingError::SerializationError(e.to_string()))
    }

    // Duration text for descriptive lines; zero renders as the "unspecified" label.
    pub fn describe_duration<'a>(&self, input: impl Into<DurationInput<'a>>) -> String {
        format_duration(input, &self.config.duration_labels)
            .unwrap_or_else(|| self.config.duration_labels.unspecified.clone())
    }

    // Duration text for numeric lines; zero means the line is omitted.
    pub fn duration_text<'a>(&self, input: impl Into<DurationInput<'a>>) -> Option<String> {
        format_duration(input, &self.config.duration_labels)
    }

    fn empty_summary(&self, cache_counts: Option<&OptionCounts>) -> ItinerarySummary {
        ItinerarySummary::empty(
            &self.config.default_currency,
            reconcile(cache_counts, OptionCounts::default()),
        )
    }
}
