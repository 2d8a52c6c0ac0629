//! Map camera projection for the tracking view.
//!
//! The camera command is a pure function of the selected van and the stop
//! table: fit to the route's bounds when at least two of its stops resolve,
//! center on the only resolvable stop otherwise. [`MapViewport`] only keeps
//! the last command issued so the map layer can pick it up; nothing else is
//! remembered between refreshes.
//!
//! A refresh happens when the selection changes, when the selected van
//! completes a stop, or when playback starts ([`ViewportRefresh`]).

use bevy::prelude::*;
use serde::Serialize;

use crate::config::TrackingConfig;
use crate::fleet::{Fleet, StopCompleted, StopCoordinates, VanId};
use crate::geo::{Bounds, LatLng};

/// The van the user is following on the map, if any.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectedVan(pub Option<VanId>);

/// Screen-space padding applied when fitting to bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgePadding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgePadding {
    pub fn uniform(px: f32) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

/// A visible map region expressed as a center plus lat/lng span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub center: LatLng,
    pub lat_delta: f64,
    pub lng_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CameraCommand {
    FitToBounds {
        coordinates: Vec<LatLng>,
        padding: EdgePadding,
    },
    Center {
        region: Region,
    },
}

impl CameraCommand {
    /// The region this command ends up showing, ignoring screen padding.
    pub fn region(&self) -> Option<Region> {
        match self {
            CameraCommand::FitToBounds { coordinates, .. } => {
                let bounds = Bounds::from_points(coordinates)?;
                Some(Region {
                    center: bounds.center(),
                    lat_delta: bounds.lat_span(),
                    lng_delta: bounds.lng_span(),
                })
            }
            CameraCommand::Center { region } => Some(*region),
        }
    }
}

/// Last camera command handed to the map, and how many have been issued.
#[derive(Resource, Debug, Clone, Default)]
pub struct MapViewport {
    pub last_command: Option<CameraCommand>,
    pub issued: u64,
}

/// Ask for the camera command to be recomputed and re-issued.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ViewportRefresh;

/// Camera command for the selected van's route, or `None` when nothing is
/// selected, the van is unknown, or none of its stops resolve.
pub fn camera_command(
    selected: Option<VanId>,
    fleet: &Fleet,
    stops: &StopCoordinates,
    config: &TrackingConfig,
) -> Option<CameraCommand> {
    let van = fleet.van(selected?)?;
    let coordinates: Vec<LatLng> = van.stops.iter().filter_map(|s| stops.get(s)).collect();

    match coordinates.as_slice() {
        [] => None,
        [only] => Some(CameraCommand::Center {
            region: Region {
                center: *only,
                lat_delta: config.center_delta,
                lng_delta: config.center_delta,
            },
        }),
        _ => Some(CameraCommand::FitToBounds {
            coordinates,
            padding: EdgePadding::uniform(config.edge_padding_px),
        }),
    }
}

/// System: re-issue the camera command when something relevant changed.
pub fn refresh_viewport(
    selected: Res<SelectedVan>,
    fleet: Res<Fleet>,
    stops: Res<StopCoordinates>,
    config: Res<TrackingConfig>,
    mut refresh: EventReader<ViewportRefresh>,
    mut stop_events: EventReader<StopCompleted>,
    mut viewport: ResMut<MapViewport>,
) {
    let requested = refresh.read().count() > 0;
    let selected_progressed = stop_events
        .read()
        .filter(|e| Some(e.van) == selected.0)
        .count()
        > 0;
    if !(requested || selected_progressed || selected.is_changed()) {
        return;
    }

    let Some(command) = camera_command(selected.0, &fleet, &stops, &config) else {
        return;
    };
    debug!("Camera: {command:?}");
    viewport.last_command = Some(command);
    viewport.issued += 1;
}

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedVan>()
            .init_resource::<MapViewport>()
            .add_event::<ViewportRefresh>()
            .add_systems(
                Update,
                refresh_viewport.in_set(crate::TrackingUpdateSet::Viewport),
            );
    }
}
