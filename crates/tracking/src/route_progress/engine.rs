//! Per-tick route progress: a pure function from the current fleet to the
//! next one.
//!
//! A route of `N` stops is split into `N - 1` equal segments. Each tick adds
//! a fixed increment to a van's progress (clamped just below 1.0), the
//! segment index is `floor(progress * (N - 1))`, and the position is a linear
//! interpolation between that segment's two stops. Once the stored progress
//! has reached the clamp, the next tick runs the completion step instead.
//!
//! Nothing here performs I/O or touches ECS state; the caller applies the
//! returned vans in one batch and handles the report.

use chrono::{DateTime, Local};

use crate::config::{format_eta, TrackingConfig};
use crate::fleet::{PassengerResponses, StopCoordinates, Van, VanId, VanStatus};
use crate::stop_completion::{complete_route, has_arrived, record_arrival};

/// A stop completed during the tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopArrival {
    pub van: VanId,
    pub stop: String,
}

/// A stop name that had no coordinate; the van held its last position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnresolvedStop {
    pub van: VanId,
    pub stop: String,
}

/// Result of one tick over the whole fleet.
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// The fleet after the tick, same order as the input.
    pub vans: Vec<Van>,
    pub arrivals: Vec<StopArrival>,
    /// Vans that transitioned to `Completed` this tick.
    pub completed: Vec<VanId>,
    pub unresolved: Vec<UnresolvedStop>,
    /// En-route vans whose route is too short to move along.
    pub parked: Vec<VanId>,
}

/// Lookup tables and tunables shared by every van in a tick.
pub struct TickContext<'a> {
    pub stops: &'a StopCoordinates,
    pub responses: &'a PassengerResponses,
    pub config: &'a TrackingConfig,
    pub now: DateTime<Local>,
}

/// Advance every en-route van by one tick. Idle and completed vans are
/// copied through untouched.
pub fn advance_fleet(vans: &[Van], ctx: &TickContext) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    let mut next = vans.to_vec();
    for van in &mut next {
        advance_van(van, ctx, &mut outcome);
    }
    outcome.vans = next;
    outcome
}

/// Position of a route at `progress`: the segment index and the fraction
/// covered within that segment.
pub fn segment_at(progress: f64, segments: usize) -> (usize, f64) {
    let scaled = progress.max(0.0) * segments as f64;
    let index = scaled.floor() as usize;
    (index, scaled - index as f64)
}

/// Advance a single van, recording arrivals, completion and lookup failures
/// into `outcome`.
pub fn advance_van(van: &mut Van, ctx: &TickContext, outcome: &mut TickOutcome) {
    if !van.is_en_route() {
        return;
    }
    let stop_count = van.stops.len();
    if stop_count < 2 {
        outcome.parked.push(van.id);
        return;
    }
    if van.progress >= ctx.config.max_progress {
        complete_van(van, ctx, outcome);
        return;
    }

    let progress = (van.progress + ctx.config.progress_increment).min(ctx.config.max_progress);
    let (segment_index, segment_progress) = segment_at(progress, van.segment_count());
    if segment_index >= stop_count - 1 {
        complete_van(van, ctx, outcome);
        return;
    }
    van.progress = progress.max(van.progress);

    let from_name = van.stops[segment_index].clone();
    let to_name = van.stops[segment_index + 1].clone();
    let from = ctx.stops.get(&from_name);
    let to = ctx.stops.get(&to_name);

    match (from, to) {
        (Some(a), Some(b)) => van.current_location = a.lerp(b, segment_progress),
        _ => {
            for (name, coord) in [(&from_name, from), (&to_name, to)] {
                if coord.is_none() {
                    outcome.unresolved.push(UnresolvedStop {
                        van: van.id,
                        stop: name.clone(),
                    });
                }
            }
        }
    }

    van.current_stop = to_name;
    van.eta = format_eta(ctx.config.eta_minutes(van.progress));

    let Some(start) = from else {
        return;
    };
    if has_arrived(
        van.current_location,
        start,
        &from_name,
        &van.completed_stops,
        ctx.config.arrival_threshold,
    ) {
        for stop in record_arrival(van, segment_index, ctx.responses, ctx.now) {
            outcome.arrivals.push(StopArrival { van: van.id, stop });
        }
    }
}

/// Terminal step: snap to the final stop, complete everything, freeze.
fn complete_van(van: &mut Van, ctx: &TickContext, outcome: &mut TickOutcome) {
    let Some(last) = van.stops.last().cloned() else {
        return;
    };
    match ctx.stops.get(&last) {
        Some(coord) => van.current_location = coord,
        None => outcome.unresolved.push(UnresolvedStop {
            van: van.id,
            stop: last.clone(),
        }),
    }

    for stop in complete_route(van, ctx.now) {
        outcome.arrivals.push(StopArrival { van: van.id, stop });
    }
    van.current_stop = last;
    van.eta = format_eta(0);
    van.status = VanStatus::Completed;
    outcome.completed.push(van.id);
}
