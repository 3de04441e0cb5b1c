//! Event assembly: target alignment, barrier search, effective end times.

use crate::barriers::apply_barriers;
use finlabel_core::{BreachRule, Event, Result, TimeSeries, TimestampMs};
use finlabel_parallel::Dispatcher;
use std::collections::HashMap;
use tracing::debug;

/// Assemble labeling events and resolve their effective end times.
///
/// * `t_events`: seed timestamps, typically from the CUSUM filter;
/// * `pt_sl`: symmetric barrier multipliers `(pt, sl)`, 0 disables;
/// * `targets`: return-magnitude series, typically daily volatility;
///   seeds with no aligned target or with `target <= min_ret` are dropped;
/// * `t1`: optional vertical barriers per seed; `None` entries (or a
///   missing map) mean no time limit for that event.
///
/// The barrier search runs through `dispatcher`, one molecule of events per
/// worker. Each returned event's `t1` is the earliest of its stop-loss,
/// profit-take and vertical barrier times; events where none resolved keep
/// `t1 = None` and are excluded at labeling.
#[allow(clippy::too_many_arguments)]
pub fn build_events(
    close: &TimeSeries,
    t_events: &[TimestampMs],
    pt_sl: (f64, f64),
    targets: &TimeSeries,
    min_ret: f64,
    t1: Option<&[(TimestampMs, Option<TimestampMs>)]>,
    rule: BreachRule,
    dispatcher: &Dispatcher,
) -> Result<Vec<Event>> {
    build(
        close, t_events, pt_sl, targets, min_ret, t1, None, rule, dispatcher,
    )
}

/// Meta-labeling variant of [`build_events`].
///
/// With a `side` series the position direction comes from the external
/// signal and the two barrier multipliers apply independently; without
/// one, the side defaults to +1 and the barriers are symmetric in
/// `pt_sl.0`. Seeds with no aligned side are dropped.
#[allow(clippy::too_many_arguments)]
pub fn build_events_meta(
    close: &TimeSeries,
    t_events: &[TimestampMs],
    pt_sl: (f64, f64),
    targets: &TimeSeries,
    min_ret: f64,
    t1: Option<&[(TimestampMs, Option<TimestampMs>)]>,
    side: Option<&TimeSeries>,
    rule: BreachRule,
    dispatcher: &Dispatcher,
) -> Result<Vec<Event>> {
    let pt_sl = match side {
        Some(_) => pt_sl,
        None => (pt_sl.0, pt_sl.0),
    };
    build(
        close, t_events, pt_sl, targets, min_ret, t1, side, rule, dispatcher,
    )
}

#[allow(clippy::too_many_arguments)]
fn build(
    close: &TimeSeries,
    t_events: &[TimestampMs],
    pt_sl: (f64, f64),
    targets: &TimeSeries,
    min_ret: f64,
    t1: Option<&[(TimestampMs, Option<TimestampMs>)]>,
    side: Option<&TimeSeries>,
    rule: BreachRule,
    dispatcher: &Dispatcher,
) -> Result<Vec<Event>> {
    let t1_by_start: HashMap<TimestampMs, Option<TimestampMs>> = t1
        .map(|pairs| pairs.iter().copied().collect())
        .unwrap_or_default();

    let mut events = Vec::with_capacity(t_events.len());
    for &start in t_events {
        let Some(target) = targets.value_at(start) else {
            debug!(start, "no target aligned with event seed, dropped");
            continue;
        };
        if !target.is_finite() || target <= min_ret {
            debug!(start, target, "target at or below minimum, dropped");
            continue;
        }

        let event_side = match side {
            Some(series) => match series.value_at(start) {
                Some(s) => s,
                None => {
                    debug!(start, "no side aligned with event seed, dropped");
                    continue;
                }
            },
            None => 1.0,
        };

        events.push(Event {
            start,
            t1: t1_by_start.get(&start).copied().flatten(),
            target,
            side: event_side,
        });
    }

    let touches = dispatcher.run(
        events.len(),
        |range| apply_barriers(close, &events, pt_sl, rule, range),
        |t| t.start,
    )?;

    // Replace each event's vertical limit with the earliest barrier touch.
    let first_touch: HashMap<TimestampMs, Option<TimestampMs>> = touches
        .iter()
        .map(|t| (t.start, t.first_touch()))
        .collect();
    for event in &mut events {
        event.t1 = first_touch.get(&event.start).copied().flatten();
    }

    Ok(events)
}
