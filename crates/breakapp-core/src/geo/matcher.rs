//! Distance search over located candidates.

use super::model::{BoundingBox, Coordinate, Distanced, Located};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate length of one degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Lower bound for `cos(latitude)` when widening the longitude window.
const MIN_COS_LATITUDE: f64 = 1e-6;

/// Great-circle distance between two coordinates in kilometres.
///
/// Identical inputs yield exactly `0.0`, and the result is symmetric.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h slightly outside [0, 1]
    let h = h.clamp(0.0, 1.0);

    let distance = 2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt());
    distance.max(0.0)
}

/// Finds candidates within a radius of a query point.
///
/// Matching runs in two phases: a bounding-box prefilter that discards
/// obviously distant candidates, then an exact haversine check. Results are
/// sorted nearest first.
#[derive(Debug, Clone, Copy)]
pub struct GeoMatcher {
    default_radius_km: f64,
}

impl Default for GeoMatcher {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl GeoMatcher {
    pub fn new(default_radius_km: f64) -> Self {
        Self { default_radius_km }
    }

    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }

    /// Resolves an optional caller radius against the configured default.
    pub fn radius_or_default(&self, radius_km: Option<f64>) -> f64 {
        radius_km.unwrap_or(self.default_radius_km)
    }

    /// Builds the prefilter window for a search.
    ///
    /// Near the poles the cosine term is clamped, so the longitude window
    /// grows until it spans the whole globe instead of dividing by zero.
    pub fn bounding_box(&self, origin: &Coordinate, radius_km: f64) -> BoundingBox {
        let radius_km = radius_km.max(0.0);
        let lat_delta = radius_km / KM_PER_DEGREE;
        let cos_lat = origin.latitude.to_radians().cos().abs().max(MIN_COS_LATITUDE);
        let lon_delta = (radius_km / (KM_PER_DEGREE * cos_lat)).min(180.0);

        BoundingBox {
            center: *origin,
            lat_delta,
            lon_delta,
        }
    }

    /// Returns every candidate within `radius_km` of `origin`, nearest first.
    ///
    /// A non-positive or non-finite radius yields no matches.
    pub fn within_radius<T, I>(&self, origin: &Coordinate, radius_km: f64, candidates: I) -> Vec<Distanced<T>>
    where
        T: Located,
        I: IntoIterator<Item = T>,
    {
        if !radius_km.is_finite() || radius_km <= 0.0 || !origin.is_finite() {
            return Vec::new();
        }

        let bbox = self.bounding_box(origin, radius_km);

        let mut matches: Vec<Distanced<T>> = candidates
            .into_iter()
            .filter(|candidate| bbox.contains(&candidate.coordinate()))
            .filter_map(|candidate| {
                let distance_km = haversine_km(origin, &candidate.coordinate());
                (distance_km <= radius_km).then_some(Distanced {
                    item: candidate,
                    distance_km,
                })
            })
            .collect();

        matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        tracing::debug!(
            "[GeoMatcher] {} candidate(s) within {}km of ({}, {})",
            matches.len(),
            radius_km,
            origin.latitude,
            origin.longitude
        );

        matches
    }
}
