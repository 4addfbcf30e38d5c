use super::cache::{CachedFacing, FacingCache};
use super::resolver::FacingResolver;
use crate::sdk::orientation::{CompassDirection, GeoPoint};
use crate::sdk::properties::Property;
use crate::sdk::roads::service::RoadSetProvider;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::{fs, io::Result as IoResult, path::Path};

/// The outcome for one property. Exactly one of `facing` and `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyFacing {
    pub address: String,
    pub location: GeoPoint,
    pub facing: Option<CompassDirection>,
    pub road_name: Option<String>,
    pub road_distance_m: Option<f64>,
    pub from_cache: bool,
    pub error: Option<String>,
}

impl PropertyFacing {
    fn resolved(property: &Property, cached: &CachedFacing, from_cache: bool) -> Self {
        Self {
            address: property.address.clone(),
            location: property.location,
            facing: Some(cached.direction),
            road_name: cached.road_name.clone(),
            road_distance_m: Some(cached.distance_m),
            from_cache,
            error: None,
        }
    }

    fn failed(property: &Property, error: String) -> Self {
        Self {
            address: property.address.clone(),
            location: property.location,
            facing: None,
            road_name: None,
            road_distance_m: None,
            from_cache: false,
            error: Some(error),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.facing.is_some()
    }
}

/// Resolves every property in order, one at a time.
///
/// A failure is recorded against its property and never stops the batch.
/// Successful resolutions are added to `cache`; points cached under the
/// resolver's search radius skip the provider entirely.
pub fn analyze_properties<P: RoadSetProvider>(
    properties: &[Property],
    resolver: &FacingResolver<P>,
    cache: &mut FacingCache,
) -> Vec<PropertyFacing> {
    let mut results = Vec::with_capacity(properties.len());

    for property in properties {
        log::info!("Analyzing property at {}", property.address);

        if let Some(cached) = cache.get(property.location, resolver.radius_m()) {
            log::debug!("[CACHE HIT] {}", property.location);
            log::info!("Facing Direction: {} (cached)", cached.direction);
            results.push(PropertyFacing::resolved(property, cached, true));
            continue;
        }

        match resolver.resolve(property.location) {
            Ok(facing) => {
                log::info!(
                    "Facing Direction: {} (from {}, {:.0} m away)",
                    facing.direction,
                    facing.road_name.as_deref().unwrap_or("Unnamed road"),
                    facing.distance_m
                );
                let cached = CachedFacing::new(&facing, resolver.radius_m());
                results.push(PropertyFacing::resolved(property, &cached, false));
                cache.insert(property.location, cached);
            }
            Err(err) => {
                log::error!("Error determining facing direction for {}: {}", property.address, err);
                results.push(PropertyFacing::failed(property, err.to_string()));
            }
        }
    }

    results
}

/// Counts for the end-of-run log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub resolved: usize,
    pub cached: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[PropertyFacing]) -> Self {
        results.iter().fold(Self::default(), |mut summary, r| {
            summary.total += 1;
            if r.is_resolved() {
                summary.resolved += 1;
                if r.from_cache {
                    summary.cached += 1;
                }
            } else {
                summary.failed += 1;
            }
            summary
        })
    }
}

#[derive(Debug, Serialize)]
pub struct FacingReport {
    pub generated_at: DateTime<Local>,
    pub source: String,
    pub radius_m: f64,
    pub results: Vec<PropertyFacing>,
}

impl FacingReport {
    pub fn new(source: String, radius_m: f64, results: Vec<PropertyFacing>) -> Self {
        Self {
            generated_at: Local::now(),
            source,
            radius_m,
            results,
        }
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let json_output = serde_json::to_string_pretty(self)?;
        fs::write(path, json_output)
    }
}
