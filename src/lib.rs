pub mod sdk;

pub use sdk::config::FacingConfig;
pub use sdk::error::ProviderError;
pub use sdk::facing::{analyze_properties, FacingCache, FacingResolver};
pub use sdk::orientation::{CompassDirection, FacingError, GeoPoint, RoadGeometry};
pub use sdk::roads::RoadSetProvider;
