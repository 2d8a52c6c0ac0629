//! Fleet file: the JSON document that seeds the tracker.
//!
//! ```json
//! {
//!   "config": { "arrival_threshold": 0.0005 },
//!   "stops": { "Main Gate": { "lat": 24.71, "lng": 46.67 } },
//!   "vans": [
//!     {
//!       "id": 1,
//!       "name": "Van 1",
//!       "status": "EnRoute",
//!       "stops": ["Main Gate", "Library"],
//!       "passengers": [{ "name": "Huda", "pickup_point": "Library" }]
//!     }
//!   ],
//!   "passenger_responses": [{ "name": "Huda", "pickup_point": "Library" }],
//!   "selected": 1
//! }
//! ```
//!
//! Everything except `vans[].id`, `vans[].name` and `vans[].stops` is
//! optional. Loading validates the seed before any resource is built.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::config::{format_eta, TrackingConfig};
use crate::config_error::ConfigError;
use crate::fleet::{
    Fleet, PassengerAssignment, PassengerResponse, PassengerResponses, StopCoordinates,
    TripStats, Van, VanId, VanStatus,
};
use crate::geo::LatLng;
use crate::viewport::SelectedVan;

#[derive(Debug, Clone, Deserialize)]
pub struct VanSeed {
    pub id: VanId,
    pub name: String,
    #[serde(default)]
    pub status: VanStatus,
    pub stops: Vec<String>,
    #[serde(default)]
    pub completed_stops: Vec<String>,
    /// Defaults to the first stop's coordinate.
    #[serde(default)]
    pub current_location: Option<LatLng>,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub passengers: Vec<PassengerAssignment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FleetFile {
    #[serde(default)]
    pub config: TrackingConfig,
    #[serde(default)]
    pub stops: HashMap<String, LatLng>,
    #[serde(default)]
    pub vans: Vec<VanSeed>,
    #[serde(default)]
    pub passenger_responses: Vec<PassengerResponse>,
    #[serde(default)]
    pub selected: Option<VanId>,
}

/// Everything a fleet file turns into, ready to insert into a `World`.
#[derive(Debug, Clone)]
pub struct FleetResources {
    pub config: TrackingConfig,
    pub stops: StopCoordinates,
    pub responses: PassengerResponses,
    pub fleet: Fleet,
    pub stats: TripStats,
    pub selected: SelectedVan,
}

impl FleetResources {
    pub fn insert_into(self, world: &mut World) {
        world.insert_resource(self.config);
        world.insert_resource(self.stops);
        world.insert_resource(self.responses);
        world.insert_resource(self.fleet);
        world.insert_resource(self.stats);
        world.insert_resource(self.selected);
    }
}

impl FleetFile {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: FleetFile = serde_json::from_str(json)?;
        file.validate()?;
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let file = Self::from_json(&json)?;
        info!(
            "Loaded fleet file {}: {} vans, {} stops",
            path.display(),
            file.vans.len(),
            file.stops.len()
        );
        Ok(file)
    }

    /// Check the invariants the tracker relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;

        let mut ids = HashSet::new();
        for van in &self.vans {
            if !ids.insert(van.id) {
                return Err(ConfigError::DuplicateVan(van.id));
            }
            if !(0.0..1.0).contains(&van.progress) {
                return Err(ConfigError::InvalidProgress {
                    van: van.id,
                    progress: van.progress,
                });
            }
            // Completed stops must be a prefix of the route.
            for (i, stop) in van.completed_stops.iter().enumerate() {
                if van.stops.get(i) != Some(stop) {
                    return Err(ConfigError::CompletedStopOffRoute {
                        van: van.id,
                        stop: stop.clone(),
                    });
                }
            }
        }
        if let Some(selected) = self.selected {
            if !ids.contains(&selected) {
                return Err(ConfigError::UnknownSelectedVan(selected));
            }
        }
        Ok(())
    }

    pub fn into_resources(self) -> FleetResources {
        let stops = StopCoordinates(self.stops);
        let mut fleet = Fleet::default();
        let mut stats = TripStats::default();

        for seed in self.vans {
            let van = seed.into_van(&stops, &self.config);
            match van.status {
                VanStatus::EnRoute => stats.record_dispatch(),
                VanStatus::Completed => stats.completed_trips += 1,
                VanStatus::Idle => {}
            }
            fleet.add_van(van);
        }

        FleetResources {
            config: self.config,
            stops,
            responses: PassengerResponses(self.passenger_responses),
            fleet,
            stats,
            selected: SelectedVan(self.selected),
        }
    }
}

impl VanSeed {
    fn into_van(self, stops: &StopCoordinates, config: &TrackingConfig) -> Van {
        let location = self
            .current_location
            .or_else(|| self.stops.first().and_then(|s| stops.get(s)))
            .unwrap_or_default();
        let current_stop = self
            .stops
            .get(self.completed_stops.len())
            .or(self.stops.last())
            .cloned()
            .unwrap_or_default();
        let eta = match self.status {
            VanStatus::Completed => format_eta(0),
            _ => format_eta(config.eta_minutes(self.progress)),
        };

        Van {
            id: self.id,
            name: self.name,
            status: self.status,
            stops: self.stops,
            completed_stops: self.completed_stops,
            current_location: location,
            current_stop,
            progress: self.progress,
            eta,
            passengers: self.passengers,
        }
    }
}
