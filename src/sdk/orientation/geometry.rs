//! Geographic point type and the planar/spherical primitives the
//! orientation heuristic is built from.
//!
//! Public inputs are always `(lat, lon)`. Planar computations treat
//! longitude as `x` and latitude as `y`; [`GeoPoint::xy`] is the only place
//! that performs that swap.

use geo::{EuclideanDistance, LineString, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Plane coordinates `(x, y) = (lon, lat)`.
    #[inline]
    pub fn xy(self) -> (f64, f64) {
        (self.lon, self.lat)
    }

    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// --- Bearing ---

/// Degrees clockwise from true north, always in `[0, 360)`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Bearing(f64);

impl Bearing {
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360.0
        if normalized >= 360.0 {
            Self(0.0)
        } else {
            Self(normalized)
        }
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Rotates clockwise by `delta` degrees (negative rotates anticlockwise).
    pub fn rotate(self, delta: f64) -> Self {
        Self::from_degrees(self.0 + delta)
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}

/// Initial great-circle bearing (forward azimuth) from `from` to `to`.
///
/// Undefined for coincident points; callers must not pass them.
pub fn bearing(from: GeoPoint, to: GeoPoint) -> Bearing {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_lambda = (to.lon - from.lon).to_radians();

    let x = d_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();

    Bearing::from_degrees(x.atan2(y).to_degrees())
}

// --- Distances ---

/// Distance from the origin to the polyline through the projected vertices.
fn min_segment_distance<F>(vertices: &[GeoPoint], project: F) -> f64
where
    F: Fn(GeoPoint) -> (f64, f64),
{
    let origin = Point::new(0.0, 0.0);
    match vertices {
        [] => f64::INFINITY,
        [only] => origin.euclidean_distance(&Point::from(project(*only))),
        _ => {
            let line: LineString<f64> = vertices.iter().map(|v| project(*v)).collect();
            origin.euclidean_distance(&line)
        }
    }
}

/// Minimum planar distance from `p` to a polyline, in degrees.
///
/// Longitude and latitude are treated as plane coordinates, so this is only
/// meaningful over the few tens of metres a road search covers. An empty
/// polyline is infinitely far away.
pub fn distance_to_polyline(p: GeoPoint, vertices: &[GeoPoint]) -> f64 {
    let (px, py) = p.xy();
    min_segment_distance(vertices, |v| {
        let (x, y) = v.xy();
        (x - px, y - py)
    })
}

/// Approximate distance from `p` to a polyline in metres.
///
/// Projects the vertices onto a local equirectangular plane centred on `p`.
/// Used for radius filtering and reporting, never for road selection.
pub fn approx_distance_m(p: GeoPoint, vertices: &[GeoPoint]) -> f64 {
    let cos_lat = p.lat.to_radians().cos();
    min_segment_distance(vertices, |v| {
        (
            (v.lon - p.lon).to_radians() * cos_lat * EARTH_RADIUS_M,
            (v.lat - p.lat).to_radians() * EARTH_RADIUS_M,
        )
    })
}

// --- Side of line ---

/// Which side of the directed line `a → b` a point lies on, by the sign of
/// the planar cross product.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// Cross product > 0: anticlockwise of `a → b` (west of a northbound road).
    Positive,
    /// Cross product < 0.
    Negative,
    /// Exactly on the infinite line through `a` and `b`.
    OnLine,
}

/// `(B.x - A.x)(P.y - A.y) - (B.y - A.y)(P.x - A.x)` with `(x, y) = (lon, lat)`.
pub fn cross(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    let (px, py) = p.xy();
    let (ax, ay) = a.xy();
    let (bx, by) = b.xy();
    (bx - ax) * (py - ay) - (by - ay) * (px - ax)
}

pub fn side_of_line(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> Side {
    let c = cross(p, a, b);
    if c > 0.0 {
        Side::Positive
    } else if c < 0.0 {
        Side::Negative
    } else {
        Side::OnLine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!(close(bearing(origin, GeoPoint::new(1.0, 0.0)).degrees(), 0.0));
        assert!(close(bearing(origin, GeoPoint::new(0.0, 1.0)).degrees(), 90.0));
        assert!(close(bearing(origin, GeoPoint::new(-1.0, 0.0)).degrees(), 180.0));
        assert!(close(bearing(origin, GeoPoint::new(0.0, -1.0)).degrees(), 270.0));
    }

    #[test]
    fn bearing_stays_in_range() {
        let a = GeoPoint::new(-33.95, 151.00);
        for i in 0..72 {
            let angle = (i as f64 * 5.0).to_radians();
            let b = GeoPoint::new(a.lat + 0.001 * angle.cos(), a.lon + 0.001 * angle.sin());
            let deg = bearing(a, b).degrees();
            assert!((0.0..360.0).contains(&deg), "bearing {deg} out of range");
        }
    }

    #[test]
    fn reverse_bearing_differs_by_half_turn() {
        // Along a meridian the great-circle reverse is exactly opposite.
        let a = GeoPoint::new(-33.95, 151.0);
        let b = GeoPoint::new(-33.94, 151.0);
        let forward = bearing(a, b).degrees();
        let back = bearing(b, a).degrees();
        assert!(close((back - forward).rem_euclid(360.0), 180.0));

        // At street scale it is opposite to well within a hundredth of a degree.
        let c = GeoPoint::new(-33.9501, 151.0003);
        let diff = (bearing(c, a).degrees() - bearing(a, c).degrees()).rem_euclid(360.0);
        assert!((diff - 180.0).abs() < 0.01, "diff = {diff}");
    }

    #[test]
    fn bearing_normalization() {
        assert_eq!(Bearing::from_degrees(360.0).degrees(), 0.0);
        assert_eq!(Bearing::from_degrees(-90.0).degrees(), 270.0);
        assert_eq!(Bearing::from_degrees(450.0).degrees(), 90.0);
        assert_eq!(Bearing::from_degrees(-1e-18).degrees(), 0.0);
        assert_eq!(Bearing::from_degrees(10.0).rotate(-90.0).degrees(), 280.0);
    }

    #[test]
    fn polyline_distance_uses_nearest_segment() {
        // Horizontal line y = 1 from x = 0..2, then up to (2, 3).
        let line = [
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(3.0, 2.0),
        ];
        assert!(close(distance_to_polyline(GeoPoint::new(0.0, 1.0), &line), 1.0));
        assert!(close(distance_to_polyline(GeoPoint::new(2.0, 3.0), &line), 1.0));
        // Beyond the first endpoint the distance is to the vertex.
        assert!(close(distance_to_polyline(GeoPoint::new(1.0, -3.0), &line), 3.0));
    }

    #[test]
    fn polyline_distance_degenerate_inputs() {
        assert_eq!(distance_to_polyline(GeoPoint::new(0.0, 0.0), &[]), f64::INFINITY);
        let single = [GeoPoint::new(3.0, 4.0)];
        assert!(close(distance_to_polyline(GeoPoint::new(0.0, 0.0), &single), 5.0));
    }

    #[test]
    fn polyline_distance_on_and_between_vertices() {
        let line = [
            GeoPoint::new(-33.9710, 150.9930),
            GeoPoint::new(-33.9690, 150.9930),
            GeoPoint::new(-33.9690, 150.9950),
        ];
        assert!(close(distance_to_polyline(GeoPoint::new(-33.9700, 150.9930), &line), 0.0));
        assert!(close(distance_to_polyline(GeoPoint::new(-33.9700, 150.9929), &line), 0.0001));
        // Repeated vertices collapse to a point distance.
        let stuck = [GeoPoint::new(0.0, 3.0), GeoPoint::new(0.0, 3.0)];
        assert!(close(distance_to_polyline(GeoPoint::new(4.0, 0.0), &stuck), 5.0));
    }

    #[test]
    fn approx_metres_matches_degree_scale() {
        // One thousandth of a degree of latitude is ~111 m.
        let p = GeoPoint::new(-33.95, 151.0);
        let line = [GeoPoint::new(-33.949, 150.99), GeoPoint::new(-33.949, 151.01)];
        let d = approx_distance_m(p, &line);
        assert!((d - 111.19).abs() < 0.5, "d = {d}");
    }

    #[test]
    fn side_of_northbound_road() {
        let start = GeoPoint::new(0.0, 0.0);
        let end = GeoPoint::new(1.0, 0.0);
        assert_eq!(side_of_line(GeoPoint::new(0.5, -0.1), start, end), Side::Positive);
        assert_eq!(side_of_line(GeoPoint::new(0.5, 0.1), start, end), Side::Negative);
        assert_eq!(side_of_line(GeoPoint::new(2.0, 0.0), start, end), Side::OnLine);
    }
}
