//! Geographic value types.

use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Anything with a fixed position that can be ranked by distance.
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

/// An axis-aligned latitude/longitude window around a center point.
///
/// The window is a cheap superset of a circular search area. Longitude
/// containment wraps across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub center: Coordinate,
    pub lat_delta: f64,
    pub lon_delta: f64,
}

impl BoundingBox {
    pub fn min_latitude(&self) -> f64 {
        (self.center.latitude - self.lat_delta).max(-90.0)
    }

    pub fn max_latitude(&self) -> f64 {
        (self.center.latitude + self.lat_delta).min(90.0)
    }

    pub fn min_longitude(&self) -> f64 {
        self.center.longitude - self.lon_delta
    }

    pub fn max_longitude(&self) -> f64 {
        self.center.longitude + self.lon_delta
    }

    /// True when the box covers every longitude.
    pub fn spans_all_longitudes(&self) -> bool {
        self.lon_delta >= 180.0
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        if point.latitude < self.min_latitude() || point.latitude > self.max_latitude() {
            return false;
        }
        if self.spans_all_longitudes() {
            return true;
        }
        // Signed longitude difference normalised into [-180, 180)
        let diff = (point.longitude - self.center.longitude + 540.0).rem_euclid(360.0) - 180.0;
        diff.abs() <= self.lon_delta
    }
}

/// A value annotated with its great-circle distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distanced<T> {
    pub item: T,
    /// Unrounded distance, used for filtering and ordering
    pub distance_km: f64,
}

impl<T> Distanced<T> {
    /// Distance rounded to two decimal places for display.
    pub fn display_distance_km(&self) -> f64 {
        (self.distance_km * 100.0).round() / 100.0
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Distanced<U> {
        Distanced {
            item: f(self.item),
            distance_km: self.distance_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_wraps_antimeridian() {
        let bbox = BoundingBox {
            center: Coordinate::new(0.0, 179.9),
            lat_delta: 0.1,
            lon_delta: 0.2,
        };
        assert!(bbox.contains(&Coordinate::new(0.0, -179.95)));
        assert!(!bbox.contains(&Coordinate::new(0.0, -179.0)));
    }

    #[test]
    fn test_display_distance_rounds() {
        let d = Distanced {
            item: (),
            distance_km: 1.23456,
        };
        assert_eq!(d.display_distance_km(), 1.23);
    }
}
