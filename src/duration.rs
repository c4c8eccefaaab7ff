// Duration codec for the `PT#H#M` subset of ISO-8601 used by flight offers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?$").expect("duration pattern is valid")
});

// Unit words used when rendering durations for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DurationLabels {
    pub hours: String,
    pub minutes: String,
    // Shown by descriptive call sites when a duration has no usable value.
    pub unspecified: String,
}

impl Default for DurationLabels {
    fn default() -> Self {
        Self {
            hours: "ชั่วโมง".to_string(),
            minutes: "นาที".to_string(),
            unspecified: "ไม่ระบุ".to_string(),
        }
    }
}

// Either a precomputed number of seconds or a raw ISO string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationInput<'a> {
    Seconds(i64),
    Iso(&'a str),
}

impl From<i64> for DurationInput<'_> {
    fn from(seconds: i64) -> Self {
        DurationInput::Seconds(seconds)
    }
}

impl<'a> From<&'a str> for DurationInput<'a> {
    fn from(s: &'a str) -> Self {
        DurationInput::Iso(s)
    }
}

// Hours and minutes of a matching duration string, `None` when it does not match.
pub fn parse_components(s: &str) -> Option<(i64, i64)> {
    let captures = DURATION_PATTERN.captures(s.trim())?;
    let unit = |index: usize| -> Option<i64> {
        match captures.get(index) {
            Some(m) => m.as_str().parse::<i64>().ok(),
            None => Some(0),
        }
    };
    Some((unit(1)?, unit(2)?))
}

// Seconds encoded by `s`; anything that is not `PT[nH][nM]` is zero.
pub fn parse_duration(s: &str) -> i64 {
    parse_components(s)
        .and_then(|(hours, minutes)| {
            hours
                .checked_mul(3600)
                .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        })
        .unwrap_or(0)
}

// Seconds of an optional duration field.
pub fn segment_seconds(duration: Option<&str>) -> i64 {
    duration.map_or(0, parse_duration)
}

// Sum of second counts; None once it no longer fits in an i64.
pub fn checked_total(seconds: impl IntoIterator<Item = i64>) -> Option<i64> {
    seconds.into_iter().try_fold(0_i64, i64::checked_add)
}

// Render a duration from its non-zero components.
pub fn format_duration<'a>(
    input: impl Into<DurationInput<'a>>,
    labels: &DurationLabels,
) -> Option<String> {
    let seconds = match input.into() {
        DurationInput::Seconds(seconds) => seconds,
        DurationInput::Iso(s) => {
            if parse_components(s).is_none() {
                return Some(s.to_string());
            }
            parse_duration(s)
        }
    };

    if seconds <= 0 {
        return None;
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{} {}", hours, labels.hours));
    }
    if minutes > 0 {
        parts.push(format!("{} {}", minutes, labels.minutes));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("PT4H25M", 15900; "hours and minutes")]
    #[test_case("PT2H", 7200; "hours only")]
    #[test_case("PT45M", 2700; "minutes only")]
    #[test_case("PT", 0; "bare prefix")]
    #[test_case("4H25M", 0; "missing prefix")]
    #[test_case("P1DT2H", 0; "days are outside the subset")]
    #[test_case("", 0; "empty")]
    fn test_parse_duration(input: &str, expected: i64) {
        assert_eq!(parse_duration(input), expected);
    }

    #[test]
    fn test_checked_total() {
        assert_eq!(checked_total([3600, 1800]), Some(5400));
        assert_eq!(checked_total(Vec::new()), Some(0));
        assert_eq!(checked_total([i64::MAX, 1]), None);
    }

    #[test]
    fn test_round_trip_keeps_hour_minute_pair() {
        let labels = DurationLabels::default();
        for (hours, minutes) in [(4, 25), (0, 50), (13, 0), (1, 1)] {
            let encoded = format!("PT{}H{}M", hours, minutes);
            let seconds = parse_duration(&encoded);
            let mut expected = Vec::new();
            if hours > 0 {
                expected.push(format!("{} ชั่วโมง", hours));
            }
            if minutes > 0 {
                expected.push(format!("{} นาที", minutes));
            }
            assert_eq!(
                format_duration(seconds, &labels),
                Some(expected.join(" ")),
                "round trip failed for {}",
                encoded
            );
        }
    }

    #[test]
    fn test_format_from_iso_string() {
        let labels = DurationLabels::default();
        assert_eq!(
            format_duration("PT4H25M", &labels).as_deref(),
            Some("4 ชั่วโมง 25 นาที")
        );
        assert_eq!(
            format_duration("PT90M", &labels).as_deref(),
            Some("1 ชั่วโมง 30 นาที")
        );
    }

    #[test]
    fn test_format_identity_for_unrecognized_text() {
        let labels = DurationLabels::default();
        assert_eq!(
            format_duration("about two hours", &labels).as_deref(),
            Some("about two hours")
        );
    }

    #[test]
    fn test_format_zero_is_left_to_caller() {
        let labels = DurationLabels::default();
        assert_eq!(format_duration("PT0H0M", &labels), None);
        assert_eq!(format_duration(0_i64, &labels), None);
        assert_eq!(format_duration(59_i64, &labels), None);
    }

    #[test]
    fn test_custom_labels() {
        let labels = DurationLabels {
            hours: "h".to_string(),
            minutes: "min".to_string(),
            unspecified: "n/a".to_string(),
        };
        assert_eq!(
            format_duration(5400_i64, &labels).as_deref(),
            Some("1 h 30 min")
        );
    }
}
