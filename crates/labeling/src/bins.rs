//! Label construction from resolved events.

use finlabel_core::{Event, Label, TimeSeries};
use tracing::debug;

/// Plain labeling: `bin = sign(ret)`.
///
/// Events with no resolved end time are excluded, never errored: an event
/// is either fully labeled or entirely absent from the output. Prices at
/// the event start and end are aligned by back-fill.
pub fn label_events(events: &[Event], close: &TimeSeries) -> Vec<Label> {
    labeled(events, close, false)
}

/// Meta-labeling: score whether the side's directional call was
/// profitable. The return is multiplied by the side first, then
/// `bin = 1` if it is positive, else 0.
pub fn label_events_meta(events: &[Event], close: &TimeSeries) -> Vec<Label> {
    labeled(events, close, true)
}

fn labeled(events: &[Event], close: &TimeSeries, meta: bool) -> Vec<Label> {
    let mut out = Vec::with_capacity(events.len());

    for event in events {
        let Some(end) = event.t1 else {
            debug!(start = event.start, "event never resolved, dropped");
            continue;
        };
        let (Some(px0), Some(px1)) = (
            close.value_at_or_after(event.start),
            close.value_at_or_after(end),
        ) else {
            debug!(start = event.start, "no aligned price, dropped");
            continue;
        };

        let mut ret = px1 / px0 - 1.0;
        let bin = if meta {
            ret *= event.side;
            if ret > 0.0 {
                1
            } else {
                0
            }
        } else if ret > 0.0 {
            1
        } else if ret < 0.0 {
            -1
        } else {
            0
        };

        out.push(Label {
            start: event.start,
            ret,
            bin,
        });
    }

    out
}
