use crate::sdk::error::ProviderError;
use crate::sdk::orientation::{GeoPoint, RoadGeometry};

pub trait RoadSetProvider: Send + Sync {
    /// Returns every road within `radius_m` metres of `point`, in the
    /// provider's own order. An empty vec means no roads were found.
    ///
    /// Transient failures are retried inside the provider; an error here is
    /// final for this point.
    fn fetch_roads_near(&self, point: GeoPoint, radius_m: f64) -> Result<Vec<RoadGeometry>, ProviderError>;
}

impl<P: RoadSetProvider + ?Sized> RoadSetProvider for Box<P> {
    fn fetch_roads_near(&self, point: GeoPoint, radius_m: f64) -> Result<Vec<RoadGeometry>, ProviderError> {
        (**self).fetch_roads_near(point, radius_m)
    }
}

impl<P: RoadSetProvider + ?Sized> RoadSetProvider for &P {
    fn fetch_roads_near(&self, point: GeoPoint, radius_m: f64) -> Result<Vec<RoadGeometry>, ProviderError> {
        (**self).fetch_roads_near(point, radius_m)
    }
}
