//! Arrival detection and per-stop passenger pickup.
//!
//! A van "arrives" at the start stop of its current segment when its
//! interpolated position comes within the arrival threshold of that stop and
//! the stop is not yet completed. Recording an arrival is idempotent: a stop
//! is appended to `completed_stops` once, and a passenger is picked once.

use chrono::{DateTime, Local};

use crate::fleet::{PassengerResponses, PickupStatus, Van};
use crate::geo::LatLng;

/// True when `position` is within `threshold` of `stop_coord` and `stop` has
/// not been completed yet.
pub fn has_arrived(
    position: LatLng,
    stop_coord: LatLng,
    stop: &str,
    completed: &[String],
    threshold: f64,
) -> bool {
    if completed.iter().any(|s| s == stop) {
        return false;
    }
    position.distance(stop_coord) < threshold
}

/// The pickup point a passenger is matched against: their declared response
/// if they answered the poll, otherwise the assignment's own pickup point.
fn matched_pickup<'a>(
    name: &str,
    assigned: &'a str,
    responses: &'a PassengerResponses,
) -> &'a str {
    responses.declared_pickup(name).unwrap_or(assigned)
}

/// Pick up every waiting passenger whose pickup point is `stop`. Returns the
/// number of passengers picked.
pub fn pick_up_at(
    van: &mut Van,
    stop: &str,
    responses: &PassengerResponses,
    now: DateTime<Local>,
) -> usize {
    let mut picked = 0;
    for passenger in &mut van.passengers {
        if passenger.status != PickupStatus::Waiting {
            continue;
        }
        if matched_pickup(&passenger.name, &passenger.pickup_point, responses) != stop {
            continue;
        }
        if passenger.pick(now) {
            picked += 1;
        }
    }
    picked
}

/// Record arrival at `van.stops[stop_index]`.
///
/// Completed stops stay a prefix of the route: any earlier stop that was
/// passed without registering an arrival is completed first, in order. Each
/// newly completed stop picks up its waiting passengers. Returns the stops
/// completed by this call.
pub fn record_arrival(
    van: &mut Van,
    stop_index: usize,
    responses: &PassengerResponses,
    now: DateTime<Local>,
) -> Vec<String> {
    let Some(upto) = van.stops.get(..=stop_index) else {
        return Vec::new();
    };
    let newly: Vec<String> = upto
        .iter()
        .filter(|s| !van.has_completed_stop(s))
        .cloned()
        .collect();

    for stop in &newly {
        van.completed_stops.push(stop.clone());
        pick_up_at(van, stop, responses, now);
    }
    newly
}

/// Terminal bookkeeping for a van that reached the end of its route: every
/// stop is completed and every passenger still waiting is picked, with `now`
/// as the pickup time where none was recorded. Returns the stops completed by
/// this call.
pub fn complete_route(van: &mut Van, now: DateTime<Local>) -> Vec<String> {
    let newly: Vec<String> = van
        .stops
        .iter()
        .filter(|s| !van.has_completed_stop(s))
        .cloned()
        .collect();
    van.completed_stops.extend(newly.iter().cloned());

    for passenger in &mut van.passengers {
        passenger.pick(now);
    }
    newly
}
