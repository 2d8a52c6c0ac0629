//! Methods on `Fleet` used by the owning screen to register and dispatch vans.

use super::types::*;

impl Fleet {
    /// Register a van. Returns `false` (and leaves the fleet unchanged) if a
    /// van with the same id already exists.
    pub fn add_van(&mut self, van: Van) -> bool {
        if self.van(van.id).is_some() {
            return false;
        }
        self.vans.push(van);
        true
    }

    pub fn van(&self, id: VanId) -> Option<&Van> {
        self.vans.iter().find(|v| v.id == id)
    }

    pub fn van_mut(&mut self, id: VanId) -> Option<&mut Van> {
        self.vans.iter_mut().find(|v| v.id == id)
    }

    /// Start an idle van on its route. Returns `false` if the van does not
    /// exist or is not idle; started and finished vans cannot be restarted.
    pub fn dispatch(&mut self, id: VanId, stats: &mut TripStats) -> bool {
        let Some(van) = self.van_mut(id) else {
            return false;
        };
        if van.status != VanStatus::Idle {
            return false;
        }
        van.status = VanStatus::EnRoute;
        stats.record_dispatch();
        true
    }

    pub fn en_route(&self) -> impl Iterator<Item = &Van> {
        self.vans.iter().filter(|v| v.is_en_route())
    }

    pub fn en_route_count(&self) -> usize {
        self.en_route().count()
    }

    /// En-route vans that will actually advance; short routes stay parked.
    pub fn moving_count(&self) -> usize {
        self.en_route().filter(|v| v.can_move()).count()
    }

    pub fn completed_count(&self) -> usize {
        self.vans.iter().filter(|v| v.is_completed()).count()
    }

    /// True when no van is moving and at least one has finished.
    pub fn is_settled(&self) -> bool {
        self.en_route_count() == 0 && self.completed_count() > 0
    }
}
