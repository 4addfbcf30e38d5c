use super::error::FacingError;
use super::geometry::GeoPoint;
use super::road::RoadGeometry;

/// A candidate road and its planar distance (degrees) to the query point.
#[derive(Debug, Clone, Copy)]
pub struct NearestRoad<'a> {
    pub road: &'a RoadGeometry,
    pub distance: f64,
}

/// Picks the road closest to `point` by a linear scan.
///
/// Roads without two distinct vertices, or whose distance is not finite, are
/// skipped, so the winner can always be handed to the resolver. On equal distances the road seen first wins.
pub fn nearest_road(point: GeoPoint, roads: &[RoadGeometry]) -> Result<NearestRoad<'_>, FacingError> {
    let mut best: Option<NearestRoad<'_>> = None;

    for road in roads {
        if road.is_degenerate() {
            log::debug!(
                "Skipping {}: no two distinct vertices among {}",
                road,
                road.vertices().len()
            );
            continue;
        }

        let distance = road.distance_to(point);
        if !distance.is_finite() {
            log::debug!("Skipping {}: distance is not finite", road);
            continue;
        }

        if best.map_or(true, |current| distance < current.distance) {
            best = Some(NearestRoad { road, distance });
        }
    }

    best.ok_or(FacingError::NoCandidates)
}
