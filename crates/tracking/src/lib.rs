use bevy::prelude::*;

pub mod config;
pub mod config_error;
pub mod fleet;
pub mod fleet_file;
pub mod geo;
pub mod markers;
pub mod playback;
pub mod route_progress;
pub mod stop_completion;
pub mod tracking_sets;
pub mod viewport;

#[cfg(test)]
pub mod test_harness;

pub use tracking_sets::{TrackingSet, TrackingUpdateSet};

use playback::PlaybackState;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Number of fixed ticks that actually ran (paused frames do not count).
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickCounter>()
            .init_resource::<config::TrackingConfig>()
            .configure_sets(
                FixedUpdate,
                (
                    TrackingSet::PreTick,
                    TrackingSet::Tick,
                    TrackingSet::PostTick,
                )
                    .chain()
                    .run_if(in_state(PlaybackState::Playing)),
            )
            .configure_sets(
                Update,
                (TrackingUpdateSet::Viewport, TrackingUpdateSet::Presentation).chain(),
            )
            .add_systems(Update, config::sync_fixed_timestep);

        app.add_plugins((
            playback::PlaybackPlugin,
            fleet::FleetPlugin,
            route_progress::RouteProgressPlugin,
            viewport::ViewportPlugin,
            markers::MarkersPlugin,
        ));
    }
}
