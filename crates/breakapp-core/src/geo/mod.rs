//! Geography-aware candidate matching.
//!
//! # Module Structure
//!
//! - `model`: `Coordinate`, `BoundingBox`, `Distanced<T>` and the `Located` trait
//! - `matcher`: `GeoMatcher` (bounding-box prefilter + haversine ranking)

mod matcher;
mod model;

pub use matcher::{EARTH_RADIUS_KM, GeoMatcher, KM_PER_DEGREE, haversine_km};
pub use model::{BoundingBox, Coordinate, Distanced, Located};
