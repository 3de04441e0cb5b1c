//! Vertical (time) barrier derivation.

use finlabel_core::{days_ms, TimeSeries, TimestampMs};

/// For each event start, the first close timestamp at or after
/// `start + num_days` calendar days, or `None` when the holding period
/// runs past the end of the series.
pub fn vertical_barriers(
    close: &TimeSeries,
    t_events: &[TimestampMs],
    num_days: i64,
) -> Vec<(TimestampMs, Option<TimestampMs>)> {
    let horizon = days_ms(num_days);
    t_events
        .iter()
        .map(|&start| (start, close.ts_at_or_after(start + horizon)))
        .collect()
}
