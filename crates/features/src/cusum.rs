//! Symmetric CUSUM event filter.
//!
//! Emits event timestamps when cumulative upward or downward drift in a
//! return series exceeds a threshold. Strictly sequential: the state at
//! each step depends on every prior step, so this must never be split
//! across the work partitioner.

use finlabel_core::{Error, Result, TimeSeries, TimestampMs};
use tracing::debug;

/// Threshold feeding the filter: a fixed scalar or a time-varying series.
#[derive(Debug, Clone)]
pub enum CusumThreshold {
    /// Same threshold at every step.
    Fixed(f64),
    /// Per-timestamp thresholds, back-filled onto the difference series.
    /// Steps past the last threshold timestamp are skipped; a resolved
    /// value that is non-positive or non-finite is rejected.
    Series(TimeSeries),
}

/// Running CUSUM state: two one-sided accumulators.
#[derive(Debug, Clone, Default)]
pub struct CusumFilter {
    s_pos: f64,
    s_neg: f64,
}

impl CusumFilter {
    /// Create a filter with both accumulators at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one first-difference value against threshold `h`.
    ///
    /// Returns true when either accumulator crosses the threshold; the
    /// crossing accumulator resets to zero. The upward branch is evaluated
    /// first, so a simultaneous crossing reports the upward event and
    /// resets only `s_pos`.
    pub fn update(&mut self, d: f64, h: f64) -> bool {
        self.s_pos = (self.s_pos + d).max(0.0);
        self.s_neg = (self.s_neg + d).min(0.0);

        if self.s_pos > h {
            self.s_pos = 0.0;
            true
        } else if self.s_neg < -h {
            self.s_neg = 0.0;
            true
        } else {
            false
        }
    }

    /// Current accumulator values `(s_pos, s_neg)`.
    pub fn state(&self) -> (f64, f64) {
        (self.s_pos, self.s_neg)
    }
}

/// Run the CUSUM filter over a close series.
///
/// The filter operates on the first difference of the percent-change
/// series. Returns the strictly increasing event timestamps.
pub fn cusum_filter(close: &TimeSeries, threshold: &CusumThreshold) -> Result<Vec<TimestampMs>> {
    if let CusumThreshold::Fixed(h) = threshold {
        if !h.is_finite() || *h <= 0.0 {
            return Err(Error::threshold(format!(
                "cusum threshold must be positive and finite, got {h}"
            )));
        }
    }

    let diff = close.pct_change().diff();
    let mut filter = CusumFilter::new();
    let mut events = Vec::new();

    for (t, d) in diff.timestamps().iter().copied().zip(diff.values()) {
        let h = match threshold {
            CusumThreshold::Fixed(h) => *h,
            CusumThreshold::Series(series) => match series.value_at_or_after(t) {
                Some(h) if h.is_finite() && h > 0.0 => h,
                Some(h) => {
                    return Err(Error::threshold(format!(
                        "cusum threshold must be positive and finite, got {h} at ts {t}"
                    )));
                }
                None => {
                    debug!(ts_ms = t, "no threshold resolvable at step, skipping");
                    continue;
                }
            },
        };

        if filter.update(*d, h) {
            events.push(t);
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, f64)]) -> TimeSeries {
        TimeSeries::new(points.iter().copied()).unwrap()
    }

    #[test]
    fn test_rejects_bad_fixed_threshold() {
        let close = series(&[(0, 100.0), (1, 101.0), (2, 102.0)]);
        assert!(cusum_filter(&close, &CusumThreshold::Fixed(0.0)).is_err());
        assert!(cusum_filter(&close, &CusumThreshold::Fixed(-0.1)).is_err());
        assert!(cusum_filter(&close, &CusumThreshold::Fixed(f64::NAN)).is_err());
    }

    #[test]
    fn test_reset_invariant_after_event() {
        let mut filter = CusumFilter::new();
        // Drive the positive accumulator over the threshold.
        assert!(!filter.update(0.004, 0.01));
        assert!(!filter.update(0.004, 0.01));
        assert!(filter.update(0.004, 0.01));
        let (s_pos, _) = filter.state();
        assert_eq!(s_pos, 0.0);

        // Same on the downward side.
        let mut filter = CusumFilter::new();
        assert!(!filter.update(-0.008, 0.01));
        assert!(filter.update(-0.008, 0.01));
        let (_, s_neg) = filter.state();
        assert_eq!(s_neg, 0.0);
    }

    #[test]
    fn test_upward_branch_wins_tie() {
        // Build a state with both accumulators non-zero, then drop the
        // threshold so both exceed it on the same step.
        let mut filter = CusumFilter::new();
        filter.update(0.10, 1.0); // ( 0.10,  0.00)
        filter.update(-0.05, 1.0); // ( 0.05, -0.05)

        let fired = filter.update(0.0, 0.04);
        assert!(fired);
        let (s_pos, s_neg) = filter.state();
        // Upward branch fired and reset s_pos; s_neg is left as-is even
        // though it also exceeded the threshold.
        assert_eq!(s_pos, 0.0);
        assert!((s_neg - (-0.05)).abs() < 1e-12);
    }

    #[test]
    fn test_events_strictly_increasing_no_duplicates() {
        // Oscillating close produces repeated crossings.
        let close = series(
            &(0..40)
                .map(|i| (i as i64, 100.0 + if i % 2 == 0 { 0.0 } else { 3.0 }))
                .collect::<Vec<_>>(),
        );
        let events = cusum_filter(&close, &CusumThreshold::Fixed(0.02)).unwrap();
        assert!(!events.is_empty());
        for pair in events.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_no_events_when_threshold_too_high() {
        let close = series(&[(0, 100.0), (1, 100.1), (2, 100.2), (3, 100.3)]);
        let events = cusum_filter(&close, &CusumThreshold::Fixed(1.0)).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_rejects_bad_series_threshold() {
        let close = series(&[(0, 100.0), (10, 105.0), (20, 99.0), (30, 104.0)]);

        // A zero threshold resolved at any step is a misconfiguration,
        // not a skip.
        let thresholds = series(&[(0, 0.01), (20, 0.0)]);
        assert!(cusum_filter(&close, &CusumThreshold::Series(thresholds)).is_err());

        let thresholds = series(&[(30, -0.5)]);
        assert!(cusum_filter(&close, &CusumThreshold::Series(thresholds)).is_err());
    }

    #[test]
    fn test_series_threshold_backfill_and_skip() {
        // Large swings so events fire wherever a threshold resolves.
        let close = series(
            &(0..10)
                .map(|i| (i as i64 * 10, 100.0 * (1.0 + 0.05 * (i % 2) as f64)))
                .collect::<Vec<_>>(),
        );
        // Earlier steps back-fill onto the first threshold; steps after
        // the last threshold timestamp have no resolution and are skipped.
        let thresholds = series(&[(50, 0.01), (70, 0.01)]);
        let events = cusum_filter(&close, &CusumThreshold::Series(thresholds)).unwrap();
        assert!(!events.is_empty());
        assert!(events.iter().all(|&t| t <= 70));

        // The fixed-threshold run keeps firing past t=70.
        let all = cusum_filter(&close, &CusumThreshold::Fixed(0.01)).unwrap();
        assert!(all.iter().any(|&t| t > 70));
    }
}
