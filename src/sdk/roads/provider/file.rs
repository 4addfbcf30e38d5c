use super::overpass::parse_response;
use crate::sdk::error::ProviderError;
use crate::sdk::orientation::{GeoPoint, RoadGeometry};
use crate::sdk::roads::service::RoadSetProvider;
use std::{fs, path::Path};

/// Answers road queries from a saved Overpass JSON response.
///
/// The file is read once; each query returns the ways passing within the
/// search radius, in file order.
pub struct OverpassFileProvider {
    roads: Vec<RoadGeometry>,
}

impl OverpassFileProvider {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        log::debug!("[PROVIDER] Loading saved Overpass data from {}", path.display());
        let text = fs::read_to_string(path)?;
        let roads = parse_response(&text)?.into_roads();
        log::info!("Loaded {} roads from {}", roads.len(), path.display());
        Ok(Self { roads })
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }
}

impl RoadSetProvider for OverpassFileProvider {
    fn fetch_roads_near(&self, point: GeoPoint, radius_m: f64) -> Result<Vec<RoadGeometry>, ProviderError> {
        log::debug!(
            "[PROVIDER] Searching {} saved roads within {} m of {}",
            self.roads.len(),
            radius_m,
            point
        );
        Ok(self
            .roads
            .iter()
            .filter(|road| road.distance_m(point) <= radius_m)
            .cloned()
            .collect())
    }
}
