//! OHLC derivation between bar boundaries.
//!
//! High and low must come from the raw reference series at full resolution,
//! never from the reduced bar series.

use finlabel_core::{OhlcBar, TimeSeries, TimestampMs};

/// Compute one OHLC bar per consecutive boundary pair `[start, end]`.
///
/// Open is the reference value at `start`, close the value at `end`;
/// high/low scan the raw reference observations inside the window. Windows
/// with no reference observation are skipped.
pub fn ohlc_bars(reference: &TimeSeries, boundaries: &[TimestampMs]) -> Vec<OhlcBar> {
    let mut out = Vec::with_capacity(boundaries.len().saturating_sub(1));

    for pair in boundaries.windows(2) {
        let (start, end) = (pair[0], pair[1]);

        let mut window = reference.range(start, end).peekable();
        let open = match window.peek() {
            Some(&(_, v)) => v,
            None => continue,
        };

        let mut high = f64::NEG_INFINITY;
        let mut low = f64::INFINITY;
        let mut close = open;
        for (_, v) in window {
            high = high.max(v);
            low = low.min(v);
            close = v;
        }

        out.push(OhlcBar {
            start,
            end,
            open,
            high,
            low,
            close,
        });
    }

    out
}
