//! Planar coordinate helpers.
//!
//! Coordinates are latitude/longitude in degrees, but all math here treats
//! them as a flat plane: distances are straight-line in degree units with no
//! projection correction. That is enough for interpolating a marker between
//! two nearby stops and for proximity checks with a tunable threshold.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Linear interpolation toward `to`. `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: LatLng, t: f64) -> LatLng {
        let t = t.clamp(0.0, 1.0);
        LatLng {
            lat: self.lat + (to.lat - self.lat) * t,
            lng: self.lng + (to.lng - self.lng) * t,
        }
    }

    /// Euclidean distance in degree units.
    pub fn distance(self, other: LatLng) -> f64 {
        let dlat = other.lat - self.lat;
        let dlng = other.lng - self.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }

    /// Heading from `self` to `to` in radians, measured from north toward
    /// east. Returns `None` when the points coincide.
    pub fn heading_to(self, to: LatLng) -> Option<f64> {
        let dlat = to.lat - self.lat;
        let dlng = to.lng - self.lng;
        if dlat == 0.0 && dlng == 0.0 {
            return None;
        }
        Some(dlng.atan2(dlat))
    }
}

/// Axis-aligned bounding box over a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: LatLng,
    pub max: LatLng,
}

impl Bounds {
    /// Bounds of two points, in either order.
    pub fn of_segment(a: LatLng, b: LatLng) -> Self {
        Self {
            min: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            max: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// Bounds of every point in `points`, or `None` if it is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.min.lat = bounds.min.lat.min(p.lat);
            bounds.min.lng = bounds.min.lng.min(p.lng);
            bounds.max.lat = bounds.max.lat.max(p.lat);
            bounds.max.lng = bounds.max.lng.max(p.lng);
        }
        Some(bounds)
    }

    /// Inclusive containment with a small tolerance for float rounding.
    pub fn contains(&self, p: LatLng) -> bool {
        const EPS: f64 = 1e-9;
        p.lat >= self.min.lat - EPS
            && p.lat <= self.max.lat + EPS
            && p.lng >= self.min.lng - EPS
            && p.lng <= self.max.lng + EPS
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min.lat + self.max.lat) / 2.0,
            (self.min.lng + self.max.lng) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max.lat - self.min.lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max.lng - self.min.lng
    }
}
