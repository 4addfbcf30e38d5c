use super::geometry::GeoPoint;
use super::road::RoadId;
use crate::sdk::error::ProviderError;
use thiserror::Error;

/// Why a facing direction could not be resolved for one coordinate.
///
/// Every variant is terminal for that coordinate only; batch callers log it
/// and move on to the next property.
#[derive(Error, Debug)]
pub enum FacingError {
    #[error("No usable road geometries to choose from")]
    NoCandidates,

    #[error("No roads found within {radius_m} m of {point}")]
    NoRoadsFound { point: GeoPoint, radius_m: f64 },

    #[error("Road {road} has {vertices} distinct vertices, at least 2 are required")]
    InvalidGeometry { road: RoadId, vertices: usize },

    #[error("Road provider failed: {0}")]
    Provider(#[from] ProviderError),
}
