use crate::sdk::error::ProviderError;
use crate::sdk::orientation::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A property to analyze: a display address plus its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub address: String,
    pub location: GeoPoint,
}

/// Identifies a suburb for a listing search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyQuery {
    pub state: String,
    pub suburb: String,
    pub postcode: String,
}

impl fmt::Display for PropertyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.suburb, self.state, self.postcode)
    }
}

pub trait PropertySource: Send + Sync {
    /// Lists properties in the queried suburb. Records without coordinates
    /// are dropped by the source.
    fn fetch_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>, ProviderError>;
}
