//! Lean time-indexed series of f64 values.
//!
//! Just the operations the pipeline needs: binary timestamp lookup,
//! inclusive range iteration, percent change, first difference, and
//! back-fill alignment. Timestamps are strictly increasing; duplicate
//! timestamps are dropped at construction, keeping the first occurrence.

use crate::error::{Error, Result};
use crate::types::TimestampMs;
use serde::{Deserialize, Serialize};

/// An ordered series mapping timestamps to values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    timestamps: Vec<TimestampMs>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series from (timestamp, value) pairs.
    ///
    /// Input must be sorted by timestamp; duplicate timestamps are dropped,
    /// keeping the first occurrence.
    pub fn new(points: impl IntoIterator<Item = (TimestampMs, f64)>) -> Result<Self> {
        let mut timestamps = Vec::new();
        let mut values = Vec::new();

        for (ts, value) in points {
            match timestamps.last() {
                Some(&last) if ts < last => {
                    return Err(Error::data(format!(
                        "timestamps out of order: {ts} after {last}"
                    )));
                }
                Some(&last) if ts == last => continue,
                _ => {
                    timestamps.push(ts);
                    values.push(value);
                }
            }
        }

        Ok(Self { timestamps, values })
    }

    /// Build a series from parallel timestamp/value slices.
    pub fn from_parts(timestamps: Vec<TimestampMs>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(Error::data(format!(
                "timestamp/value length mismatch: {} vs {}",
                timestamps.len(),
                values.len()
            )));
        }
        Self::new(timestamps.into_iter().zip(values))
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Timestamps, strictly increasing.
    pub fn timestamps(&self) -> &[TimestampMs] {
        &self.timestamps
    }

    /// Values, parallel to `timestamps()`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Observation at position `i`.
    #[inline]
    pub fn at(&self, i: usize) -> (TimestampMs, f64) {
        (self.timestamps[i], self.values[i])
    }

    /// First timestamp, if any.
    pub fn first_ts(&self) -> Option<TimestampMs> {
        self.timestamps.first().copied()
    }

    /// Last timestamp, if any.
    pub fn last_ts(&self) -> Option<TimestampMs> {
        self.timestamps.last().copied()
    }

    /// Left insertion point for `ts`: the number of timestamps < `ts`.
    #[inline]
    pub fn searchsorted(&self, ts: TimestampMs) -> usize {
        self.timestamps.partition_point(|&t| t < ts)
    }

    /// Value at exactly `ts`, if present.
    pub fn value_at(&self, ts: TimestampMs) -> Option<f64> {
        let i = self.searchsorted(ts);
        if i < self.timestamps.len() && self.timestamps[i] == ts {
            Some(self.values[i])
        } else {
            None
        }
    }

    /// Back-fill lookup: value at the first timestamp >= `ts`.
    pub fn value_at_or_after(&self, ts: TimestampMs) -> Option<f64> {
        let i = self.searchsorted(ts);
        self.values.get(i).copied()
    }

    /// First timestamp >= `ts`, if any.
    pub fn ts_at_or_after(&self, ts: TimestampMs) -> Option<TimestampMs> {
        let i = self.searchsorted(ts);
        self.timestamps.get(i).copied()
    }

    /// Iterate observations in the inclusive window `[start, end]`.
    pub fn range(
        &self,
        start: TimestampMs,
        end: TimestampMs,
    ) -> impl Iterator<Item = (TimestampMs, f64)> + '_ {
        let lo = self.searchsorted(start);
        let hi = self.timestamps.partition_point(|&t| t <= end);
        (lo..hi).map(move |i| self.at(i))
    }

    /// Percent change between consecutive observations, indexed at the
    /// later timestamp.
    pub fn pct_change(&self) -> TimeSeries {
        // Source timestamps are already strictly increasing.
        Self {
            timestamps: self.timestamps.get(1..).unwrap_or(&[]).to_vec(),
            values: (1..self.len())
                .map(|i| self.values[i] / self.values[i - 1] - 1.0)
                .collect(),
        }
    }

    /// First difference between consecutive observations, indexed at the
    /// later timestamp.
    pub fn diff(&self) -> TimeSeries {
        Self {
            timestamps: self.timestamps.get(1..).unwrap_or(&[]).to_vec(),
            values: (1..self.len())
                .map(|i| self.values[i] - self.values[i - 1])
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, f64)]) -> TimeSeries {
        TimeSeries::new(points.iter().copied()).unwrap()
    }

    #[test]
    fn test_rejects_unsorted() {
        assert!(TimeSeries::new([(10, 1.0), (5, 2.0)]).is_err());
    }

    #[test]
    fn test_drops_duplicate_keep_first() {
        let s = series(&[(1, 10.0), (2, 20.0), (2, 99.0), (3, 30.0)]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.value_at(2), Some(20.0));
    }

    #[test]
    fn test_searchsorted() {
        let s = series(&[(10, 1.0), (20, 2.0), (30, 3.0)]);
        assert_eq!(s.searchsorted(5), 0);
        assert_eq!(s.searchsorted(10), 0);
        assert_eq!(s.searchsorted(11), 1);
        assert_eq!(s.searchsorted(30), 2);
        assert_eq!(s.searchsorted(31), 3);
    }

    #[test]
    fn test_backfill_lookup() {
        let s = series(&[(10, 1.0), (20, 2.0), (30, 3.0)]);
        assert_eq!(s.value_at_or_after(15), Some(2.0));
        assert_eq!(s.value_at_or_after(20), Some(2.0));
        assert_eq!(s.value_at_or_after(31), None);
        assert_eq!(s.ts_at_or_after(11), Some(20));
    }

    #[test]
    fn test_range_inclusive() {
        let s = series(&[(10, 1.0), (20, 2.0), (30, 3.0), (40, 4.0)]);
        let window: Vec<_> = s.range(20, 30).collect();
        assert_eq!(window, vec![(20, 2.0), (30, 3.0)]);

        // Bounds that fall between observations.
        let window: Vec<_> = s.range(11, 39).collect();
        assert_eq!(window, vec![(20, 2.0), (30, 3.0)]);
    }

    #[test]
    fn test_pct_change() {
        let s = series(&[(1, 100.0), (2, 110.0), (3, 99.0)]);
        let r = s.pct_change();
        assert_eq!(r.timestamps(), &[2, 3]);
        assert!((r.values()[0] - 0.10).abs() < 1e-12);
        assert!((r.values()[1] - (99.0 / 110.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_diff() {
        let s = series(&[(1, 1.0), (2, 4.0), (3, 2.0)]);
        let d = s.diff();
        assert_eq!(d.timestamps(), &[2, 3]);
        assert_eq!(d.values(), &[3.0, -2.0]);
    }

    #[test]
    fn test_empty_series_ops() {
        let s = series(&[]);
        assert!(s.is_empty());
        assert_eq!(s.last_ts(), None);
        assert_eq!(s.pct_change().len(), 0);
    }
}
