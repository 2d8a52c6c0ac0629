//! Tunable tracking parameters.
//!
//! The constants below are the defaults. [`TrackingConfig`] carries them as a
//! resource so a fleet file can override any of them without recompiling.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config_error::ConfigError;

/// Fixed tick interval (10 Hz).
pub const TICK_INTERVAL_MS: u64 = 100;

/// Route progress added to an en-route van on every tick.
pub const PROGRESS_INCREMENT: f64 = 0.002;

/// Progress is clamped here so a van never reaches 1.0 before the explicit
/// completion step runs.
pub const MAX_PROGRESS: f64 = 0.99;

/// Proximity (in coordinate degrees) at which a van counts as having arrived
/// at a stop. Not a physical distance.
pub const ARRIVAL_THRESHOLD: f64 = 0.0005;

/// Placeholder route length used for ETA. No road-network distance.
pub const ROUTE_LENGTH_KM: f64 = 15.0;

/// Placeholder average speed used for ETA.
pub const ASSUMED_SPEED_KMH: f64 = 40.0;

/// Screen-space padding on each edge when fitting the camera to a route.
pub const EDGE_PADDING_PX: f32 = 50.0;

/// Lat/lng delta of the region used when centering on a single coordinate.
pub const CENTER_DELTA: f64 = 0.01;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub tick_interval_ms: u64,
    pub progress_increment: f64,
    pub max_progress: f64,
    pub arrival_threshold: f64,
    pub route_length_km: f64,
    pub assumed_speed_kmh: f64,
    pub edge_padding_px: f32,
    pub center_delta: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            progress_increment: PROGRESS_INCREMENT,
            max_progress: MAX_PROGRESS,
            arrival_threshold: ARRIVAL_THRESHOLD,
            route_length_km: ROUTE_LENGTH_KM,
            assumed_speed_kmh: ASSUMED_SPEED_KMH,
            edge_padding_px: EDGE_PADDING_PX,
            center_delta: CENTER_DELTA,
        }
    }
}

impl TrackingConfig {
    /// Reject values that would keep vans from ever moving or completing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, value| Err(ConfigError::InvalidConfig { field, value });

        if !self.progress_increment.is_finite() || self.progress_increment <= 0.0 {
            return invalid("progress_increment", self.progress_increment);
        }
        // Written so NaN fails too.
        if !(self.max_progress > 0.0 && self.max_progress <= 1.0) {
            return invalid("max_progress", self.max_progress);
        }
        if !self.arrival_threshold.is_finite() || self.arrival_threshold < 0.0 {
            return invalid("arrival_threshold", self.arrival_threshold);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Approximate minutes left for a van at `progress`. This is a cosmetic
    /// estimate from the placeholder constants, not a routing result.
    pub fn eta_minutes(&self, progress: f64) -> u32 {
        if self.assumed_speed_kmh <= 0.0 {
            return 0;
        }
        let remaining_km = (1.0 - progress).max(0.0) * self.route_length_km;
        (remaining_km / self.assumed_speed_kmh * 60.0).round() as u32
    }
}

/// Formats an ETA the way the tracking screen displays it.
pub fn format_eta(minutes: u32) -> String {
    format!("{minutes} min")
}

/// Applies `tick_interval_ms` to the `FixedUpdate` timestep.
pub fn sync_fixed_timestep(config: Res<TrackingConfig>, mut time: ResMut<Time<Fixed>>) {
    if !config.is_changed() {
        return;
    }
    time.set_timestep(config.tick_interval());
}
