//! Pure orientation inference: nearest-road selection and the facing
//! heuristic. Nothing in here performs I/O; every function is safe to call
//! from any thread.

pub mod compass;
pub mod error;
pub mod geometry;
pub mod nearest;
pub mod resolver;
pub mod road;

pub use compass::CompassDirection;
pub use error::FacingError;
pub use geometry::{bearing, side_of_line, Bearing, GeoPoint, Side};
pub use nearest::{nearest_road, NearestRoad};
pub use resolver::{facing_direction, Orientation};
pub use road::{RoadGeometry, RoadId};
