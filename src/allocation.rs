// Splits an aggregate price across segments by flown time.
//
// Each share is rounded to a whole currency unit on its own, so the parts
// may drift from the total by up to half a unit per segment. Displayed
// segment prices depend on this, so no remainder redistribution happens.

use crate::duration::{checked_total, segment_seconds};
use crate::plan::Segment;
use tracing::debug;

// Per-segment share of `total_price`, proportional to segment duration.
pub fn allocate(total_price: Option<f64>, segments: &[Segment]) -> Vec<Option<f64>> {
    let durations: Vec<i64> = segments
        .iter()
        .map(|s| segment_seconds(s.duration.as_deref()))
        .collect();
    allocate_by_seconds(total_price, &durations)
}

pub fn allocate_by_seconds(total_price: Option<f64>, durations: &[i64]) -> Vec<Option<f64>> {
    let unallocated = vec![None; durations.len()];

    let Some(total) = total_price.filter(|t| t.is_finite()) else {
        return unallocated;
    };

    if durations.iter().any(|&seconds| seconds <= 0) {
        debug!("segment without duration, skipping price allocation");
        return unallocated;
    }

    let sum = match checked_total(durations.iter().copied()) {
        Some(sum) if sum > 0 => sum,
        _ => {
            debug!("segment durations do not add up, skipping price allocation");
            return unallocated;
        }
    };

    durations
        .iter()
        .map(|&seconds| Some((total * seconds as f64 / sum as f64).round()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn legs(durations: &[&str]) -> Vec<Segment> {
        durations
            .iter()
            .map(|d| Segment {
                duration: Some(d.to_string()),
                ..Segment::default()
            })
            .collect()
    }

    #[test]
    fn test_split_follows_duration_ratio() {
        let shares = allocate(Some(1000.0), &legs(&["PT1H", "PT3H"]));
        assert_eq!(shares, vec![Some(250.0), Some(750.0)]);
    }

    #[test]
    fn test_independent_rounding_may_drift() {
        let shares = allocate(Some(100.0), &legs(&["PT1H", "PT1H", "PT1H"]));
        assert_eq!(shares, vec![Some(33.0), Some(33.0), Some(33.0)]);
        let sum: f64 = shares.iter().flatten().sum();
        assert!((sum - 100.0).abs() <= 3.0 / 2.0);
    }

    #[test_case(None, &["PT1H", "PT2H"]; "missing total")]
    #[test_case(Some(900.0), &["PT1H", "PT0M"]; "zero duration segment")]
    #[test_case(Some(900.0), &["PT1H", "soon"]; "unparseable duration")]
    #[test_case(Some(f64::NAN), &["PT1H"]; "non finite total")]
    fn test_no_partial_allocation(total: Option<f64>, durations: &[&str]) {
        let shares = allocate(total, &legs(durations));
        assert_eq!(shares.len(), durations.len());
        assert!(shares.iter().all(Option::is_none));
    }

    #[test]
    fn test_overflowing_durations_are_not_allocated() {
        let shares = allocate_by_seconds(Some(900.0), &[i64::MAX, 3600]);
        assert_eq!(shares, vec![None, None]);
    }

    #[test]
    fn test_empty_leg() {
        assert!(allocate(Some(500.0), &[]).is_empty());
    }

    #[test]
    fn test_by_seconds() {
        assert_eq!(
            allocate_by_seconds(Some(4500.0), &[3600, 5400]),
            vec![Some(1800.0), Some(2700.0)]
        );
    }
}
