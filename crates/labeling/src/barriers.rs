//! Triple-barrier touch search.
//!
//! For each event, walks the close path from the event start to its
//! vertical limit (or series end) and records the earliest breach of the
//! profit-take and stop-loss levels. Events are independent, so any
//! contiguous index range can be searched in isolation; this is the unit
//! of work handed to the dispatcher.

use finlabel_core::{BarrierTouches, BreachRule, Event, Result, TimeSeries};
use std::ops::Range;
use tracing::debug;

/// Search one molecule of events for barrier touches.
///
/// `pt_sl` are the profit-take and stop-loss multipliers applied to each
/// event's target; a multiplier of 0 disables that barrier. Events whose
/// start price cannot be resolved are excluded from the output.
pub fn apply_barriers(
    close: &TimeSeries,
    events: &[Event],
    pt_sl: (f64, f64),
    rule: BreachRule,
    range: Range<usize>,
) -> Result<Vec<BarrierTouches>> {
    let mut out = Vec::with_capacity(range.len());

    for event in &events[range] {
        let Some(base) = close.value_at_or_after(event.start) else {
            debug!(start = event.start, "event start beyond series, dropped");
            continue;
        };

        let end = match (event.t1, close.last_ts()) {
            (Some(t1), _) => t1,
            (None, Some(last)) => last,
            (None, None) => continue,
        };

        let pt_level = (pt_sl.0 > 0.0).then(|| pt_sl.0 * event.target);
        let sl_level = (pt_sl.1 > 0.0).then(|| -pt_sl.1 * event.target);

        let mut pt_time = None;
        let mut sl_time = None;
        for (ts, px) in close.range(event.start, end) {
            let ret = (px / base - 1.0) * event.side;
            if pt_time.is_none() {
                if let Some(level) = pt_level {
                    if rule.breaches_upper(ret, level) {
                        pt_time = Some(ts);
                    }
                }
            }
            if sl_time.is_none() {
                if let Some(level) = sl_level {
                    if rule.breaches_lower(ret, level) {
                        sl_time = Some(ts);
                    }
                }
            }
            if pt_time.is_some() && sl_time.is_some() {
                break;
            }
        }

        out.push(BarrierTouches {
            start: event.start,
            sl: sl_time,
            pt: pt_time,
            t1: event.t1,
        });
    }

    Ok(out)
}
