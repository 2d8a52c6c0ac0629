//! World setup methods for `TestFleet` (builder pattern: consumes and
//! returns Self).

use crate::config::TrackingConfig;
use crate::fleet::{
    Fleet, PassengerAssignment, PassengerResponse, PassengerResponses, StopCoordinates,
    TripStats, Van, VanId, VanStatus,
};
use crate::geo::LatLng;
use crate::viewport::SelectedVan;

use super::TestFleet;

impl TestFleet {
    pub fn with_config(mut self, config: TrackingConfig) -> Self {
        self.app.world_mut().insert_resource(config);
        self
    }

    /// Override only the arrival threshold.
    pub fn with_arrival_threshold(mut self, threshold: f64) -> Self {
        self.app
            .world_mut()
            .resource_mut::<TrackingConfig>()
            .arrival_threshold = threshold;
        self
    }

    pub fn with_stop(mut self, name: &str, lat: f64, lng: f64) -> Self {
        self.app
            .world_mut()
            .resource_mut::<StopCoordinates>()
            .insert(name, LatLng::new(lat, lng));
        self
    }

    /// Add a van as-is. En-route vans count as ongoing trips.
    pub fn with_van(mut self, van: Van) -> Self {
        let world = self.app.world_mut();
        if van.status == VanStatus::EnRoute {
            world.resource_mut::<TripStats>().record_dispatch();
        }
        world.resource_mut::<Fleet>().add_van(van);
        self
    }

    /// Add an en-route van parked at its first stop's coordinate.
    pub fn with_en_route_van(self, id: VanId, route: &[&str]) -> Self {
        let mut van = self.parked_van(id, route);
        van.status = VanStatus::EnRoute;
        self.with_van(van)
    }

    /// Add an idle van parked at its first stop's coordinate.
    pub fn with_idle_van(self, id: VanId, route: &[&str]) -> Self {
        let van = self.parked_van(id, route);
        self.with_van(van)
    }

    fn parked_van(&self, id: VanId, route: &[&str]) -> Van {
        let start = route
            .first()
            .and_then(|s| self.app.world().resource::<StopCoordinates>().get(s))
            .unwrap_or_default();
        Van::new(
            id,
            format!("Van {id}"),
            route.iter().map(|s| s.to_string()).collect(),
            start,
        )
    }

    pub fn with_passenger(mut self, van: VanId, name: &str, pickup_point: &str) -> Self {
        if let Some(van) = self.app.world_mut().resource_mut::<Fleet>().van_mut(van) {
            van.passengers
                .push(PassengerAssignment::waiting(name, pickup_point));
        }
        self
    }

    pub fn with_response(mut self, name: &str, pickup_point: &str) -> Self {
        self.app
            .world_mut()
            .resource_mut::<PassengerResponses>()
            .0
            .push(PassengerResponse {
                name: name.into(),
                pickup_point: pickup_point.into(),
            });
        self
    }

    pub fn with_selected(mut self, van: VanId) -> Self {
        self.app.world_mut().insert_resource(SelectedVan(Some(van)));
        self
    }

    /// Start playback and apply the transition.
    pub fn playing(mut self) -> Self {
        self.start();
        self
    }
}
