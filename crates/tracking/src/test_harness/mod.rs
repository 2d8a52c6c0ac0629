//! # TestFleet: headless integration test harness for the tracker
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `TrackingPlugin`
//! for running integration tests without a window or renderer.

mod queries;
mod setup;

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use crate::TrackingPlugin;

/// A headless Bevy App wrapping `TrackingPlugin` for integration testing.
///
/// Use builder methods to set up stops and vans, then call `tick()` to run
/// fixed ticks and `update()` to run a full frame (state transitions,
/// viewport, markers).
pub struct TestFleet {
    app: App,
}

impl TestFleet {
    /// An empty tracker: no stops, no vans, playback paused.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        app.add_plugins(TrackingPlugin);

        // Frozen virtual time: `app.update()` never runs `FixedUpdate` on its
        // own, so the only ticks are the ones a test asks for.
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));

        // Run one update so Startup systems and the initial state enter.
        app.update();

        Self { app }
    }
}

impl Default for TestFleet {
    fn default() -> Self {
        Self::new()
    }
}
