//! Core data types for the finlabel pipeline.

use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Milliseconds in `days` calendar days.
#[inline]
pub fn days_ms(days: i64) -> i64 {
    chrono::Duration::days(days).num_milliseconds()
}

/// A single trade observation (print).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Trade price.
    pub price: f64,
    /// Trade size.
    pub size: f64,
}

impl Tick {
    /// Volume contribution of this tick.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.size
    }

    /// Dollar value traded (price * size).
    #[inline]
    pub fn dollar_value(&self) -> f64 {
        self.price * self.size
    }
}

/// The accumulation metric driving bar boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarMetric {
    /// One unit per tick.
    TickCount,
    /// Sum of trade sizes.
    Volume,
    /// Sum of price * size.
    DollarValue,
}

impl BarMetric {
    /// Accumulator increment contributed by one tick.
    #[inline]
    pub fn increment(&self, tick: &Tick) -> f64 {
        match self {
            BarMetric::TickCount => 1.0,
            BarMetric::Volume => tick.volume(),
            BarMetric::DollarValue => tick.dollar_value(),
        }
    }
}

/// OHLC bar between two consecutive bar boundaries.
///
/// High/low are computed from the raw reference series, never from the
/// reduced bar series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    /// Boundary opening the bar.
    pub start: TimestampMs,
    /// Boundary closing the bar.
    pub end: TimestampMs,
    /// Price at the opening boundary.
    pub open: f64,
    /// Maximum price in [start, end].
    pub high: f64,
    /// Minimum price in [start, end].
    pub low: f64,
    /// Price at the closing boundary.
    pub close: f64,
}

/// A labeling candidate seeded at an event timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event start time.
    pub start: TimestampMs,
    /// Vertical (time) barrier; `None` means no time limit.
    ///
    /// After barrier search this holds the effective end time: the earliest
    /// of profit-take, stop-loss and time barrier. Still `None` when no
    /// barrier resolved.
    pub t1: Option<TimestampMs>,
    /// Unit width of the horizontal barriers (a positive return magnitude).
    pub target: f64,
    /// Assumed position direction, +1 or -1.
    pub side: f64,
}

/// Earliest barrier touch times found for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrierTouches {
    /// Event start time.
    pub start: TimestampMs,
    /// Earliest stop-loss breach, if any.
    pub sl: Option<TimestampMs>,
    /// Earliest profit-take breach, if any.
    pub pt: Option<TimestampMs>,
    /// Carried-over vertical barrier.
    pub t1: Option<TimestampMs>,
}

impl BarrierTouches {
    /// Earliest of the three barrier times, ignoring unset ones.
    pub fn first_touch(&self) -> Option<TimestampMs> {
        [self.sl, self.pt, self.t1].into_iter().flatten().min()
    }
}

/// Comparison rule for a path return against a barrier level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BreachRule {
    /// Barrier is breached only when strictly exceeded (`>` / `<`).
    #[default]
    Strict,
    /// Barrier is breached when reached exactly (`>=` / `<=`).
    Inclusive,
}

impl BreachRule {
    /// Does `ret` breach the upper (profit-take) level?
    #[inline]
    pub fn breaches_upper(&self, ret: f64, level: f64) -> bool {
        match self {
            BreachRule::Strict => ret > level,
            BreachRule::Inclusive => ret >= level,
        }
    }

    /// Does `ret` breach the lower (stop-loss) level?
    #[inline]
    pub fn breaches_lower(&self, ret: f64, level: f64) -> bool {
        match self {
            BreachRule::Strict => ret < level,
            BreachRule::Inclusive => ret <= level,
        }
    }
}

/// A labeled event, the pipeline's final output record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Event start time.
    pub start: TimestampMs,
    /// Realized return between event start and effective end.
    pub ret: f64,
    /// Outcome class: {-1, 0, 1} plain, {0, 1} meta.
    pub bin: i8,
}
