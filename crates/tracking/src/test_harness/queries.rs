//! Query and simulation-tick methods for `TestFleet`.

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;

use crate::fleet::{Fleet, TripStats, Van, VanId, VanStatus};
use crate::markers::VanMarkers;
use crate::playback::{PlaybackCommand, PlaybackState};
use crate::viewport::{MapViewport, SelectedVan};
use crate::TickCounter;

use super::TestFleet;

impl TestFleet {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed ticks by directly executing the `FixedUpdate` schedule.
    /// Run conditions still apply, so nothing moves while paused.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Tick until `done` holds for the van or `max` ticks have run. Returns
    /// the number of ticks run.
    pub fn tick_until(&mut self, van: VanId, max: u32, done: impl Fn(&Van) -> bool) -> u32 {
        for n in 0..max {
            if done(self.van(van)) {
                return n;
            }
            self.tick(1);
        }
        max
    }

    /// Run one full frame: playback commands, state transitions, viewport
    /// and marker updates. Never runs a fixed tick.
    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn command(&mut self, command: PlaybackCommand) {
        self.app.world_mut().send_event(command);
        self.update();
    }

    pub fn start(&mut self) {
        self.command(PlaybackCommand::Start);
    }

    pub fn pause(&mut self) {
        self.command(PlaybackCommand::Pause);
    }

    pub fn toggle(&mut self) {
        self.command(PlaybackCommand::Toggle);
    }

    /// Dispatch an idle van. Returns false if it was not idle.
    pub fn dispatch(&mut self, id: VanId) -> bool {
        self.app
            .world_mut()
            .resource_scope(|world, mut fleet: Mut<Fleet>| {
                fleet.dispatch(id, &mut world.resource_mut::<TripStats>())
            })
    }

    pub fn select(&mut self, van: Option<VanId>) {
        self.app.world_mut().insert_resource(SelectedVan(van));
        self.update();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    /// Every `E` still buffered. The fixed loop never runs on its own in the
    /// harness, so nothing is dropped between frames.
    pub fn sent<E: Event + Clone>(&self) -> Vec<E> {
        let events = self.resource::<Events<E>>();
        EventCursor::<E>::default().read(events).cloned().collect()
    }

    pub fn fleet(&self) -> &Fleet {
        self.resource::<Fleet>()
    }

    /// Panics if the van does not exist.
    pub fn van(&self, id: VanId) -> &Van {
        self.fleet()
            .van(id)
            .unwrap_or_else(|| panic!("van {id} not in fleet"))
    }

    pub fn status(&self, id: VanId) -> VanStatus {
        self.van(id).status
    }

    pub fn stats(&self) -> TripStats {
        *self.resource::<TripStats>()
    }

    pub fn playback(&self) -> PlaybackState {
        *self.resource::<State<PlaybackState>>().get()
    }

    pub fn viewport(&self) -> &MapViewport {
        self.resource::<MapViewport>()
    }

    pub fn markers(&self) -> &VanMarkers {
        self.resource::<VanMarkers>()
    }

    pub fn tick_count(&self) -> u64 {
        self.resource::<TickCounter>().0
    }
}
