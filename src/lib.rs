// Main library file for the trip summary engine

// Input model and lenient field readers
pub mod lenient;
pub mod plan;

// Primitives: durations, timestamps, price shares, reference data
pub mod allocation;
pub mod duration;
pub mod reference;
pub mod timing;

// Normalizers
pub mod hotel;
pub mod itinerary;
pub mod options;
pub mod pricing;
pub mod transport;

// Output model, entry point and memoization
pub mod cache;
pub mod engine;
pub mod summary;

// Re-export key types for convenience
pub use cache::{CacheConfig, CacheStatsReport, EvictionPolicy, SummaryCache};
pub use duration::{format_duration, parse_duration, DurationInput, DurationLabels};
pub use engine::{EngineConfig, ProcessingError, SummaryProcessor};
pub use hotel::GroupedHotel;
pub use options::{CountSource, OptionCounts, ReconciledCounts};
pub use plan::{RawPlan, Segment};
pub use summary::{
    ItinerarySummary, LegDirection, LegSummary, PriceBreakdown, SegmentSummary, TransportKind,
    TransportSummary,
};
