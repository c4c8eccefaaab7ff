// Layover gaps and total journey span for a leg.

use crate::duration::{checked_total, segment_seconds};
use crate::plan::Segment;
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static DAY_OFFSET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+(\d{1,2})$").expect("day offset pattern is valid"));

// Offset-less timestamps are read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// Which strategy produced a journey total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyStrategy {
    Timestamps,
    DurationSum,
}

// Parse an absolute timestamp. Time-of-day strings such as `"08:30"` are not instants.
pub fn parse_instant(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant);
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

// Days encoded by an `arrive_plus` marker like `+1`.
pub fn day_offset(plus: &str) -> Option<i64> {
    DAY_OFFSET_PATTERN
        .captures(plus.trim())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn departure_instant(segment: &Segment) -> Option<DateTime<FixedOffset>> {
    [&segment.depart_at, &segment.depart_time]
        .into_iter()
        .flatten()
        .find_map(|s| parse_instant(s))
}

fn arrival_instant(segment: &Segment) -> Option<DateTime<FixedOffset>> {
    [&segment.arrive_at, &segment.arrive_time]
        .into_iter()
        .flatten()
        .find_map(|s| parse_instant(s))
}

// Seconds between `prev` landing and `next` taking off.
pub fn layover(prev: &Segment, next: &Segment) -> Option<i64> {
    let arrived = arrival_instant(prev)?;
    let departs = departure_instant(next)?;
    let gap = (departs - arrived).num_seconds();
    if gap < 0 {
        debug!(gap, "rejecting negative layover");
        return None;
    }
    Some(gap)
}

// Layover after each segment; the last entry is always `None`.
pub fn layovers(segments: &[Segment]) -> Vec<Option<i64>> {
    let mut gaps: Vec<Option<i64>> = segments
        .windows(2)
        .map(|pair| layover(&pair[0], &pair[1]))
        .collect();
    if !segments.is_empty() {
        gaps.push(None);
    }
    gaps
}

// Total door-to-door seconds for a leg, or `None` when nothing usable exists.
pub fn total_journey(segments: &[Segment]) -> Option<i64> {
    total_journey_with_strategy(segments).map(|(seconds, _)| seconds)
}

pub fn total_journey_with_strategy(segments: &[Segment]) -> Option<(i64, JourneyStrategy)> {
    if segments.is_empty() {
        return None;
    }

    if let Some(span) = timestamp_span(segments) {
        return Some((span, JourneyStrategy::Timestamps));
    }

    let summed = duration_sum(segments)?;
    debug!(
        seconds = summed,
        "journey total falls back to summed durations"
    );
    Some((summed, JourneyStrategy::DurationSum))
}

fn timestamp_span(segments: &[Segment]) -> Option<i64> {
    let first = segments.first()?;
    let last = segments.last()?;

    let departs = departure_instant(first)?;
    let mut arrives = arrival_instant(last)?;

    if let Some(days) = last.arrive_plus.as_deref().and_then(day_offset) {
        arrives = arrives + Duration::days(days);
    }

    let span = (arrives - departs).num_seconds();
    if span < 0 {
        debug!(span, "timestamp span is negative, not usable");
        return None;
    }
    Some(span)
}

fn duration_sum(segments: &[Segment]) -> Option<i64> {
    let flying = checked_total(segments.iter().map(|s| segment_seconds(s.duration.as_deref())));
    let waiting = checked_total(layovers(segments).into_iter().flatten());

    let Some(total) = flying.zip(waiting).and_then(|(f, w)| f.checked_add(w)) else {
        debug!("summed durations overflow, journey total not computable");
        return None;
    };
    (total > 0).then_some(total)
}
