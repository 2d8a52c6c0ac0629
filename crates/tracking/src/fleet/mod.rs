//! Fleet state: vans, their passengers, and the read-only lookup tables.
//!
//! ## Data model
//! - `Van`: one vehicle travelling an ordered list of named stops
//! - `PassengerAssignment`: a passenger waiting for (or picked up by) a van
//! - `StopCoordinates`: stop name → coordinate, supplied by configuration
//! - `PassengerResponses`: declared pickup points, used for matching only
//! - `Fleet`: top-level resource holding every van
//! - `TripStats`: completed/ongoing trip counters
//!
//! Vans are created externally (fleet file or the owning screen) and are
//! never removed by the tracker.

pub mod state;
pub mod types;

pub use types::*;

use bevy::prelude::*;

/// System: send `FleetSettled` once each time the last moving van finishes.
pub fn announce_fleet_settled(
    fleet: Res<Fleet>,
    mut was_settled: Local<bool>,
    mut settled: EventWriter<FleetSettled>,
) {
    let now_settled = fleet.is_settled();
    if now_settled && !*was_settled {
        info!(
            "All vans finished: {} completed, {} idle",
            fleet.completed_count(),
            fleet.vans.len() - fleet.completed_count()
        );
        settled.send(FleetSettled);
    }
    *was_settled = now_settled;
}

pub struct FleetPlugin;

impl Plugin for FleetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Fleet>()
            .init_resource::<StopCoordinates>()
            .init_resource::<PassengerResponses>()
            .init_resource::<TripStats>()
            .add_event::<StopCompleted>()
            .add_event::<VanCompleted>()
            .add_event::<FleetSettled>()
            .add_systems(
                FixedUpdate,
                announce_fleet_settled.in_set(crate::TrackingSet::PostTick),
            );
    }
}
