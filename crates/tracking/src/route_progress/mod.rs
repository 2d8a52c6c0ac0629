//! Route progress: moves en-route vans along their stops on every tick.
//!
//! `engine` is the pure per-tick computation; `systems` wires it into the
//! `FixedUpdate` schedule. Ticks only run while playback is `Playing`.

pub mod engine;
pub mod systems;
mod tests;

pub use engine::{
    advance_fleet, advance_van, segment_at, StopArrival, TickContext, TickOutcome,
    UnresolvedStop,
};
pub use systems::{count_tick, tick_fleet};

use bevy::prelude::*;

pub struct RouteProgressPlugin;

impl Plugin for RouteProgressPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                count_tick.in_set(crate::TrackingSet::PreTick),
                tick_fleet.in_set(crate::TrackingSet::Tick),
            ),
        );
    }
}
