//! ECS systems that run the route progress engine on the fixed tick.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::config::TrackingConfig;
use crate::fleet::{
    Fleet, PassengerResponses, StopCompleted, StopCoordinates, TripStats, VanCompleted,
};
use crate::TickCounter;

use super::engine::{advance_fleet, TickContext, UnresolvedStop};

/// System: advance every en-route van by one tick and apply the result.
///
/// The new fleet is computed from a snapshot and swapped in as a whole, so
/// nothing observes a half-updated tick. Trip counters and completion events
/// are emitted after the swap.
pub fn tick_fleet(
    mut fleet: ResMut<Fleet>,
    stops: Res<StopCoordinates>,
    responses: Res<PassengerResponses>,
    config: Res<TrackingConfig>,
    mut stats: ResMut<TripStats>,
    mut stop_events: EventWriter<StopCompleted>,
    mut van_events: EventWriter<VanCompleted>,
    mut warned: Local<HashSet<UnresolvedStop>>,
) {
    if fleet.en_route_count() == 0 {
        return;
    }

    let ctx = TickContext {
        stops: &stops,
        responses: &responses,
        config: &config,
        now: chrono::Local::now(),
    };
    let outcome = advance_fleet(&fleet.vans, &ctx);

    // Warn once per van/stop pair; the van keeps holding every tick after.
    for unresolved in outcome.unresolved {
        if !warned.contains(&unresolved) {
            warn!(
                "Van {}: stop '{}' has no coordinate, holding last known position",
                unresolved.van, unresolved.stop
            );
            warned.insert(unresolved);
        }
    }
    for id in &outcome.parked {
        debug!("Van {id}: route has fewer than two stops, staying parked");
    }

    fleet.vans = outcome.vans;

    for arrival in outcome.arrivals {
        debug!("Van {} completed stop '{}'", arrival.van, arrival.stop);
        stop_events.send(StopCompleted {
            van: arrival.van,
            stop: arrival.stop,
        });
    }
    for id in outcome.completed {
        stats.record_completion();
        info!("Van {id} finished its route");
        van_events.send(VanCompleted { van: id });
    }
}

/// System: count ticks that actually ran.
pub fn count_tick(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}
