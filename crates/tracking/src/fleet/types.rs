//! Data types for vans, passengers and the read-only lookup tables.

use std::collections::HashMap;

use bevy::prelude::*;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

// =============================================================================
// Identifiers and enums
// =============================================================================

/// Unique identifier for a van.
pub type VanId = u32;

/// Van lifecycle. Transitions only move forward: Idle → EnRoute → Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VanStatus {
    #[default]
    Idle,
    EnRoute,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupStatus {
    #[default]
    Waiting,
    Picked,
}

// =============================================================================
// Data structures
// =============================================================================

/// A passenger assigned to ride a specific van.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerAssignment {
    pub name: String,
    /// Stop name where this passenger boards.
    pub pickup_point: String,
    #[serde(default)]
    pub status: PickupStatus,
    /// Set once, when the passenger transitions to `Picked`.
    #[serde(default)]
    pub pickup_time: Option<DateTime<Local>>,
}

impl PassengerAssignment {
    pub fn waiting(name: impl Into<String>, pickup_point: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pickup_point: pickup_point.into(),
            status: PickupStatus::Waiting,
            pickup_time: None,
        }
    }

    pub fn is_picked(&self) -> bool {
        self.status == PickupStatus::Picked
    }

    /// Marks the passenger picked. Returns `false` if they already were, in
    /// which case neither the status nor the stored time changes.
    pub fn pick(&mut self, at: DateTime<Local>) -> bool {
        if self.is_picked() {
            return false;
        }
        self.status = PickupStatus::Picked;
        if self.pickup_time.is_none() {
            self.pickup_time = Some(at);
        }
        true
    }
}

/// A vehicle travelling along an ordered list of stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Van {
    pub id: VanId,
    pub name: String,
    pub status: VanStatus,
    /// Ordered stop names making up the route.
    pub stops: Vec<String>,
    /// Stops already visited, always a prefix of `stops`.
    pub completed_stops: Vec<String>,
    pub current_location: LatLng,
    /// The stop the van is heading to, or the final stop once completed.
    pub current_stop: String,
    /// Fraction of the whole route covered, in `[0, 1)`.
    pub progress: f64,
    /// Display ETA, e.g. "12 min".
    pub eta: String,
    pub passengers: Vec<PassengerAssignment>,
}

impl Van {
    /// A van parked at `location` with the given route and no progress.
    pub fn new(id: VanId, name: impl Into<String>, stops: Vec<String>, location: LatLng) -> Self {
        let current_stop = stops.first().cloned().unwrap_or_default();
        Self {
            id,
            name: name.into(),
            status: VanStatus::Idle,
            stops,
            completed_stops: Vec::new(),
            current_location: location,
            current_stop,
            progress: 0.0,
            eta: String::new(),
            passengers: Vec::new(),
        }
    }

    pub fn is_en_route(&self) -> bool {
        self.status == VanStatus::EnRoute
    }

    pub fn is_completed(&self) -> bool {
        self.status == VanStatus::Completed
    }

    pub fn has_completed_stop(&self, stop: &str) -> bool {
        self.completed_stops.iter().any(|s| s == stop)
    }

    /// Number of segments on the route, never less than one.
    pub fn segment_count(&self) -> usize {
        self.stops.len().saturating_sub(1).max(1)
    }

    /// Whether the route has at least one segment to travel along.
    pub fn can_move(&self) -> bool {
        self.stops.len() >= 2
    }

    pub fn waiting_passengers(&self) -> usize {
        self.passengers.iter().filter(|p| !p.is_picked()).count()
    }
}

// =============================================================================
// Resources
// =============================================================================

/// Read-only stop name → coordinate table supplied by configuration.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopCoordinates(pub HashMap<String, LatLng>);

impl StopCoordinates {
    pub fn get(&self, stop: &str) -> Option<LatLng> {
        self.0.get(stop).copied()
    }

    pub fn insert(&mut self, stop: impl Into<String>, coord: LatLng) {
        self.0.insert(stop.into(), coord);
    }
}

/// A passenger's declared pickup point, as collected by the polls screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerResponse {
    pub name: String,
    pub pickup_point: String,
}

/// Read-only list of passenger responses, used only to cross-reference
/// pickup matching.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassengerResponses(pub Vec<PassengerResponse>);

impl PassengerResponses {
    /// The pickup point a passenger declared, if they responded.
    pub fn declared_pickup(&self, passenger: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|r| r.name == passenger)
            .map(|r| r.pickup_point.as_str())
    }
}

/// All vans known to the tracker, in insertion order.
#[derive(Resource, Debug, Clone, Default)]
pub struct Fleet {
    pub vans: Vec<Van>,
}

/// Trip counters shown on the manager dashboard. The tracker only increments
/// them; it does not own the numbers.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripStats {
    pub completed_trips: u32,
    pub ongoing_trips: u32,
}

impl TripStats {
    pub fn record_dispatch(&mut self) {
        self.ongoing_trips += 1;
    }

    pub fn record_completion(&mut self) {
        self.ongoing_trips = self.ongoing_trips.saturating_sub(1);
        self.completed_trips += 1;
    }
}

// =============================================================================
// Events
// =============================================================================

/// A van reached a stop for the first time.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct StopCompleted {
    pub van: VanId,
    pub stop: String,
}

/// A van finished its route.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VanCompleted {
    pub van: VanId,
}

/// Every van that was dispatched has finished. Sent once per settle.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FleetSettled;
