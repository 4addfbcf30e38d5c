use super::compass::CompassDirection;
use super::error::FacingError;
use super::geometry::{bearing, side_of_line, Bearing, GeoPoint, Side};
use super::road::RoadGeometry;

/// The facing heuristic's answer for one house against one road.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub direction: CompassDirection,
    pub facing_bearing: Bearing,
    pub road_bearing: Bearing,
    pub side: Side,
}

/// Infers the direction a house faces from the road it sits beside.
///
/// This is a heuristic, not a measurement: the road is collapsed to the
/// straight line between its first and last vertices, and the house is
/// assumed to face perpendicular to that line. A house on the positive side
/// of the line faces `road + 90°`; on the negative side, or exactly on the
/// line, it faces `road - 90°`.
///
/// A closed way (first vertex == last vertex) uses the last vertex that
/// differs from the first.
pub fn facing_direction(house: GeoPoint, road: &RoadGeometry) -> Result<Orientation, FacingError> {
    let (start, end) = road.endpoints().ok_or_else(|| FacingError::InvalidGeometry {
        road: road.id(),
        vertices: road.vertices().len().min(1),
    })?;

    let road_bearing = bearing(start, end);
    let left = road_bearing.rotate(-90.0);
    let right = road_bearing.rotate(90.0);

    let side = side_of_line(house, start, end);
    let facing_bearing = match side {
        Side::Positive => right,
        Side::Negative => left,
        Side::OnLine => {
            log::debug!("House {} lies on the line of {}; using the left perpendicular", house, road);
            left
        }
    };

    Ok(Orientation {
        direction: CompassDirection::from_bearing(facing_bearing),
        facing_bearing,
        road_bearing,
        side,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::orientation::road::RoadId;

    fn road(vertices: Vec<GeoPoint>) -> RoadGeometry {
        RoadGeometry::new(RoadId(42), Some("Test Street".into()), vertices)
    }

    fn northbound() -> RoadGeometry {
        road(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)])
    }

    #[test]
    fn northbound_road_positive_side_faces_east() {
        let house = GeoPoint::new(0.5, -0.001);
        let o = facing_direction(house, &northbound()).unwrap();
        assert_eq!(o.side, Side::Positive);
        assert_eq!(o.direction, CompassDirection::E);
        assert!((o.road_bearing.degrees() - 0.0).abs() < 1e-9);
        assert!((o.facing_bearing.degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn northbound_road_negative_side_faces_west() {
        let house = GeoPoint::new(0.5, 0.001);
        let o = facing_direction(house, &northbound()).unwrap();
        assert_eq!(o.side, Side::Negative);
        assert_eq!(o.direction, CompassDirection::W);
    }

    #[test]
    fn point_on_the_line_takes_the_left_perpendicular() {
        let house = GeoPoint::new(2.0, 0.0);
        let o = facing_direction(house, &northbound()).unwrap();
        assert_eq!(o.side, Side::OnLine);
        assert_eq!(o.direction, CompassDirection::W);
    }

    #[test]
    fn eastbound_road_sides() {
        let eastbound = road(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01)]);
        // North of an eastbound road is the positive side.
        let north = facing_direction(GeoPoint::new(0.001, 0.005), &eastbound).unwrap();
        assert_eq!(north.direction, CompassDirection::S);
        let south = facing_direction(GeoPoint::new(-0.001, 0.005), &eastbound).unwrap();
        assert_eq!(south.direction, CompassDirection::N);
    }

    #[test]
    fn only_endpoints_matter_for_multi_vertex_roads() {
        // A dog-leg whose overall run is due north.
        let dogleg = road(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.5, 0.3),
            GeoPoint::new(1.0, 0.0),
        ]);
        let o = facing_direction(GeoPoint::new(0.2, -0.1), &dogleg).unwrap();
        assert_eq!(o.direction, CompassDirection::E);
    }

    #[test]
    fn closed_way_uses_last_distinct_vertex() {
        let looped = road(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(0.0, 0.0),
        ]);
        let o = facing_direction(GeoPoint::new(0.5, -0.1), &looped).unwrap();
        assert_eq!(o.direction, CompassDirection::E);
    }

    #[test]
    fn rejects_roads_without_two_distinct_vertices() {
        let err = facing_direction(GeoPoint::new(0.0, 0.0), &road(vec![])).unwrap_err();
        assert!(matches!(err, FacingError::InvalidGeometry { vertices: 0, .. }));

        let stuck = road(vec![GeoPoint::new(1.0, 1.0), GeoPoint::new(1.0, 1.0)]);
        let err = facing_direction(GeoPoint::new(0.0, 0.0), &stuck).unwrap_err();
        assert!(matches!(err, FacingError::InvalidGeometry { road: RoadId(42), vertices: 1 }));
    }

    #[test]
    fn same_inputs_same_answer() {
        let house = GeoPoint::new(-33.9521, 151.0012);
        let street = road(vec![GeoPoint::new(-33.9510, 151.0000), GeoPoint::new(-33.9530, 151.0030)]);
        let first = facing_direction(house, &street).unwrap();
        let second = facing_direction(house, &street).unwrap();
        assert_eq!(first, second);
    }
}
