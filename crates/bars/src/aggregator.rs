//! Information-driven bar sampling.
//!
//! Reduces a raw tick stream to bar boundaries whenever a running
//! accumulation metric (tick count, volume or dollar value) crosses a
//! threshold. Greedy, single-pass and strictly causal: no lookahead, and
//! the trailing partial bar is dropped.

use finlabel_core::{BarMetric, Error, Result, Tick};
use tracing::debug;

/// Running accumulator that signals bar boundaries.
#[derive(Debug, Clone)]
pub struct ThresholdAccumulator {
    metric: BarMetric,
    threshold: f64,
    acc: f64,
}

impl ThresholdAccumulator {
    /// Create an accumulator for the given metric and threshold.
    ///
    /// The threshold must be positive and finite.
    pub fn new(metric: BarMetric, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::threshold(format!(
                "bar threshold must be positive and finite, got {threshold}"
            )));
        }
        Ok(Self {
            metric,
            threshold,
            acc: 0.0,
        })
    }

    /// Add one tick; returns true when this tick closes a bar.
    ///
    /// The accumulator resets to 0 on every boundary.
    pub fn add(&mut self, tick: &Tick) -> bool {
        self.acc += self.metric.increment(tick);
        if self.acc >= self.threshold {
            self.acc = 0.0;
            true
        } else {
            false
        }
    }

    /// Current accumulated amount since the last boundary.
    pub fn accumulated(&self) -> f64 {
        self.acc
    }
}

/// Indices of ticks that close a bar.
pub fn bar_indices(ticks: &[Tick], metric: BarMetric, threshold: f64) -> Result<Vec<usize>> {
    let mut acc = ThresholdAccumulator::new(metric, threshold)?;
    let mut indices = Vec::new();
    for (i, tick) in ticks.iter().enumerate() {
        if acc.add(tick) {
            indices.push(i);
        }
    }
    Ok(indices)
}

/// Reduce a tick stream to its bar-boundary ticks.
///
/// Duplicate timestamps in the result are removed, keeping the first
/// occurrence, so the output forms a strictly increasing time series.
pub fn aggregate(ticks: &[Tick], metric: BarMetric, threshold: f64) -> Result<Vec<Tick>> {
    let indices = bar_indices(ticks, metric, threshold)?;

    let mut bars: Vec<Tick> = Vec::with_capacity(indices.len());
    for i in indices {
        let tick = ticks[i];
        match bars.last() {
            Some(last) if last.ts_ms == tick.ts_ms => {
                debug!(ts_ms = tick.ts_ms, "dropping bar at duplicate timestamp");
            }
            _ => bars.push(tick),
        }
    }
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(ts_ms: i64, price: f64, size: f64) -> Tick {
        Tick { ts_ms, price, size }
    }

    fn ticks_1s(prices_sizes: &[(f64, f64)]) -> Vec<Tick> {
        prices_sizes
            .iter()
            .enumerate()
            .map(|(i, &(p, s))| tick(i as i64 * 1000, p, s))
            .collect()
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let ticks = ticks_1s(&[(100.0, 1.0)]);
        assert!(aggregate(&ticks, BarMetric::TickCount, 0.0).is_err());
        assert!(aggregate(&ticks, BarMetric::Volume, -5.0).is_err());
        assert!(aggregate(&ticks, BarMetric::DollarValue, f64::NAN).is_err());
    }

    #[test]
    fn test_tick_bars_every_n() {
        let ticks = ticks_1s(&[(1.0, 1.0); 10]);
        let idx = bar_indices(&ticks, BarMetric::TickCount, 3.0).unwrap();
        assert_eq!(idx, vec![2, 5, 8]);
    }

    #[test]
    fn test_trailing_partial_bar_dropped() {
        // 7 ticks with threshold 3: boundaries at 2 and 5, trailing tick 6
        // never closes a bar.
        let ticks = ticks_1s(&[(1.0, 1.0); 7]);
        let bars = aggregate(&ticks, BarMetric::TickCount, 3.0).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].ts_ms, 5000);
    }

    #[test]
    fn test_volume_bars_reset_on_boundary() {
        let ticks = ticks_1s(&[(1.0, 5.0), (1.0, 6.0), (1.0, 1.0), (1.0, 10.0)]);
        // acc: 5, 11 -> bar, 1, 11 -> bar
        let idx = bar_indices(&ticks, BarMetric::Volume, 10.0).unwrap();
        assert_eq!(idx, vec![1, 3]);
    }

    #[test]
    fn test_dollar_bars_use_price_times_size() {
        let ticks = ticks_1s(&[(100.0, 1.0), (100.0, 1.0), (50.0, 1.0)]);
        // dv: 100, 200 -> bar at index 1 with threshold 150
        let idx = bar_indices(&ticks, BarMetric::DollarValue, 150.0).unwrap();
        assert_eq!(idx, vec![1]);
    }

    #[test]
    fn test_output_strictly_increasing_subsequence() {
        let ticks: Vec<Tick> = (0..100)
            .map(|i| tick(i * 500, 100.0 + (i % 7) as f64, 1.0 + (i % 3) as f64))
            .collect();
        let bars = aggregate(&ticks, BarMetric::Volume, 7.0).unwrap();

        assert!(!bars.is_empty());
        for pair in bars.windows(2) {
            assert!(pair[0].ts_ms < pair[1].ts_ms);
        }
        // Every bar is one of the input ticks.
        for bar in &bars {
            assert!(ticks.iter().any(|t| t.ts_ms == bar.ts_ms));
        }
    }

    #[test]
    fn test_threshold_coverage_between_bars() {
        let ticks: Vec<Tick> = (0..50)
            .map(|i| tick(i * 1000, 10.0, 0.5 + (i % 5) as f64))
            .collect();
        let threshold = 6.0;
        let idx = bar_indices(&ticks, BarMetric::Volume, threshold).unwrap();

        let mut prev = 0usize;
        for &b in &idx {
            let sum: f64 = ticks[prev..=b].iter().map(|t| t.size).sum();
            assert!(sum >= threshold, "inter-bar volume {sum} below threshold");
            prev = b + 1;
        }
    }

    #[test]
    fn test_duplicate_timestamps_keep_first() {
        let ticks = vec![
            tick(0, 1.0, 1.0),
            tick(1000, 2.0, 1.0),
            tick(1000, 3.0, 1.0),
            tick(2000, 4.0, 1.0),
        ];
        // Threshold 1: every tick is a boundary, but 1000 appears twice.
        let bars = aggregate(&ticks, BarMetric::TickCount, 1.0).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[1].price, 2.0);
    }
}
