//! Presentation-side marker state for each van.
//!
//! The route engine only produces plain positions and statuses. This module
//! is the adapter the map layer reads from: a side map from van id to the
//! marker's transform (position, heading, scale). The engine never reads or
//! writes it.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::fleet::{Fleet, VanId};
use crate::geo::LatLng;

/// Marker scale while a van is moving.
pub const MOVING_SCALE: f32 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerTransform {
    pub position: LatLng,
    /// Heading in radians from north, clockwise toward east.
    pub rotation: f32,
    pub scale: f32,
}

impl Default for MarkerTransform {
    fn default() -> Self {
        Self {
            position: LatLng::default(),
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl MarkerTransform {
    /// Drop any in-flight rotation/scale, keeping the position.
    pub fn settle(&mut self) {
        self.rotation = 0.0;
        self.scale = 1.0;
    }

    pub fn is_settled(&self) -> bool {
        self.rotation == 0.0 && self.scale == 1.0
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct VanMarkers(pub HashMap<VanId, MarkerTransform>);

impl VanMarkers {
    pub fn get(&self, van: VanId) -> Option<&MarkerTransform> {
        self.0.get(&van)
    }
}

/// Reset a van's marker to its resting pose (sent when playback pauses).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleMarker {
    pub van: VanId,
}

/// System: follow the fleet's positions with the markers.
pub fn sync_markers(fleet: Res<Fleet>, mut markers: ResMut<VanMarkers>) {
    if !fleet.is_changed() {
        return;
    }
    for van in &fleet.vans {
        let marker = markers.0.entry(van.id).or_default();
        if van.is_en_route() {
            if let Some(heading) = marker.position.heading_to(van.current_location) {
                marker.rotation = heading as f32;
                marker.scale = MOVING_SCALE;
            }
        } else {
            marker.settle();
        }
        marker.position = van.current_location;
    }
}

/// System: apply `SettleMarker` requests.
pub fn settle_markers(mut events: EventReader<SettleMarker>, mut markers: ResMut<VanMarkers>) {
    for event in events.read() {
        if let Some(marker) = markers.0.get_mut(&event.van) {
            marker.settle();
        }
    }
}

pub struct MarkersPlugin;

impl Plugin for MarkersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VanMarkers>()
            .add_event::<SettleMarker>()
            .add_systems(
                Update,
                (sync_markers, settle_markers)
                    .chain()
                    .in_set(crate::TrackingUpdateSet::Presentation),
            );
    }
}
