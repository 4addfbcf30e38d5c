use crate::sdk::orientation::{
    facing_direction, nearest_road, Bearing, CompassDirection, FacingError, GeoPoint, RoadId, Side,
};
use crate::sdk::roads::service::RoadSetProvider;

/// A resolved facing direction and the road it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Facing {
    pub direction: CompassDirection,
    pub facing_bearing: Bearing,
    pub road_bearing: Bearing,
    pub side: Side,
    pub road_id: RoadId,
    pub road_name: Option<String>,
    /// Planar distance to the road in degrees, as used for selection.
    pub distance_deg: f64,
    pub distance_m: f64,
}

/// Composes a road provider with nearest-road selection and the facing
/// heuristic.
///
/// Holds no mutable state: the same point and the same provider answer
/// always give the same direction.
pub struct FacingResolver<P> {
    provider: P,
    radius_m: f64,
}

impl<P: RoadSetProvider> FacingResolver<P> {
    pub fn new(provider: P, radius_m: f64) -> Self {
        Self { provider, radius_m }
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Infers the facing direction of a house at `point`.
    ///
    /// Fails with [`FacingError::NoRoadsFound`] if the provider returns no
    /// roads, [`FacingError::NoCandidates`] if none of them is usable, and
    /// [`FacingError::Provider`] if the provider itself failed.
    pub fn resolve(&self, point: GeoPoint) -> Result<Facing, FacingError> {
        let roads = self.provider.fetch_roads_near(point, self.radius_m)?;
        if roads.is_empty() {
            return Err(FacingError::NoRoadsFound {
                point,
                radius_m: self.radius_m,
            });
        }

        let nearest = nearest_road(point, &roads)?;
        let orientation = facing_direction(point, nearest.road)?;

        log::debug!(
            "Nearest road to {} is {} ({:.5}°); road runs {}, house faces {}",
            point,
            nearest.road,
            nearest.distance,
            orientation.road_bearing,
            orientation.facing_bearing
        );

        Ok(Facing {
            direction: orientation.direction,
            facing_bearing: orientation.facing_bearing,
            road_bearing: orientation.road_bearing,
            side: orientation.side,
            road_id: nearest.road.id(),
            road_name: nearest.road.name().map(str::to_string),
            distance_deg: nearest.distance,
            distance_m: nearest.road.distance_m(point),
        })
    }

    pub fn resolve_facing_direction(&self, point: GeoPoint) -> Result<CompassDirection, FacingError> {
        self.resolve(point).map(|facing| facing.direction)
    }
}
