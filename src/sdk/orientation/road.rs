use super::geometry::{approx_distance_m, distance_to_polyline, GeoPoint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque source identifier of a road (the OSM way id for Overpass data).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoadId(pub i64);

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "way/{}", self.0)
    }
}

/// A mapped road as an ordered polyline.
///
/// Built fresh from provider data for every query. Roads without two distinct
/// vertices can be constructed (providers pass through whatever the source
/// returned) but are skipped during selection and rejected by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadGeometry {
    id: RoadId,
    name: Option<String>,
    vertices: Vec<GeoPoint>,
}

impl RoadGeometry {
    pub fn new(id: RoadId, name: Option<String>, vertices: Vec<GeoPoint>) -> Self {
        Self { id, name, vertices }
    }

    pub fn id(&self) -> RoadId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name for log lines and reports.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("Unnamed road")
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// The first vertex and the last vertex that differs from it.
    ///
    /// `None` when the road has no two distinct vertices, so no direction can
    /// be derived from it. A closed way yields its last non-closing vertex.
    pub fn endpoints(&self) -> Option<(GeoPoint, GeoPoint)> {
        let start = *self.vertices.first()?;
        let end = *self.vertices.iter().rev().find(|v| **v != start)?;
        Some((start, end))
    }

    pub fn is_degenerate(&self) -> bool {
        self.endpoints().is_none()
    }

    /// Planar distance in degrees from `point` to the closest segment.
    pub fn distance_to(&self, point: GeoPoint) -> f64 {
        distance_to_polyline(point, &self.vertices)
    }

    /// Approximate distance in metres from `point` to the closest segment.
    pub fn distance_m(&self, point: GeoPoint) -> f64 {
        approx_distance_m(point, &self.vertices)
    }
}

impl fmt::Display for RoadGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.id)
    }
}
