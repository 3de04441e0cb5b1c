//! Daily volatility estimation.
//!
//! Computes an exponentially weighted moving standard deviation of
//! day-over-day returns, used to calibrate barrier widths.

use finlabel_core::{days_ms, Error, Result, TimeSeries};

/// Incremental exponentially weighted standard deviation.
///
/// Uses adjusted weights `(1 - alpha)^k` with the unbiased variance
/// correction, where `alpha = 2 / (span + 1)`.
#[derive(Debug, Clone)]
pub struct EwmStd {
    alpha: f64,
    /// Sum of weights.
    w_sum: f64,
    /// Sum of squared weights.
    w_sq_sum: f64,
    /// Weighted running mean.
    mean: f64,
    /// Weighted sum of squared deviations from the running mean.
    m2: f64,
    count: usize,
}

impl EwmStd {
    /// Create an estimator with the given span in samples.
    pub fn new(span: u32) -> Result<Self> {
        if span == 0 {
            return Err(Error::config("ewm span must be at least 1"));
        }
        Ok(Self {
            alpha: 2.0 / (span as f64 + 1.0),
            w_sum: 0.0,
            w_sq_sum: 0.0,
            mean: 0.0,
            m2: 0.0,
            count: 0,
        })
    }

    /// Fold in one sample and return the current std.
    ///
    /// Returns `None` until two samples have been seen (variance of a
    /// single sample is undefined).
    ///
    /// Weighted Welford recurrence: decaying the old weights scales the
    /// deviation sum by the decay factor, leaving the mean unchanged, and
    /// the new sample enters with unit weight. Tracking deviations rather
    /// than raw moments keeps constant input streams at exactly zero
    /// variance.
    pub fn update(&mut self, x: f64) -> Option<f64> {
        let decay = 1.0 - self.alpha;
        self.w_sum = 1.0 + decay * self.w_sum;
        self.w_sq_sum = 1.0 + decay * decay * self.w_sq_sum;

        let delta = x - self.mean;
        self.mean += delta / self.w_sum;
        self.m2 = decay * self.m2 + delta * (x - self.mean);
        self.count += 1;

        if self.count < 2 {
            return None;
        }

        let denom = self.w_sum * self.w_sum - self.w_sq_sum;
        if denom <= 0.0 {
            return None;
        }
        let var = self.m2 * self.w_sum / denom;

        Some(var.max(0.0).sqrt())
    }

    /// Number of samples folded in.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Trailing daily volatility of a close series.
///
/// For each timestamp the anchor is the last observation at or before one
/// calendar day earlier; timestamps with no anchor are excluded. The
/// day-over-day returns are then folded through [`EwmStd`] with the given
/// span, and the result is indexed on a subset of `close`'s timestamps.
pub fn daily_volatility(close: &TimeSeries, span: u32) -> Result<TimeSeries> {
    let mut ewm = EwmStd::new(span)?;
    let day = days_ms(1);
    let timestamps = close.timestamps();
    let values = close.values();

    let mut points = Vec::new();
    for i in 0..close.len() {
        let needle = timestamps[i] - day;
        let pos = timestamps.partition_point(|&t| t <= needle);
        if pos == 0 {
            // No day-earlier anchor yet.
            continue;
        }
        let anchor = pos - 1;
        let ret = values[i] / values[anchor] - 1.0;
        if let Some(std) = ewm.update(ret) {
            if std.is_finite() {
                points.push((timestamps[i], std));
            }
        }
    }

    TimeSeries::new(points)
}
