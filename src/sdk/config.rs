use crate::sdk::properties::onthehouse::DEFAULT_SEARCH_URL;
use crate::sdk::roads::provider::overpass::DEFAULT_OVERPASS_URL;
use crate::sdk::util::retry::RetryPolicy;
use std::{env, fmt::Display, num::NonZeroU32, path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;

/// Default road search radius, in metres.
pub const DEFAULT_RADIUS_M: f64 = 80.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{key} must be set when FACING_ROAD_SOURCE={road_source}")]
    Missing {
        key: &'static str,
        road_source: &'static str,
    },
}

/// Where road geometries come from.
#[derive(Debug, Clone, PartialEq)]
pub enum RoadSourceConfig {
    Overpass { url: String },
    File { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub requests_per_minute: NonZeroU32,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySearchConfig {
    pub url: String,
    pub page_size: u32,
    pub max_pages: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacingConfig {
    pub roads: RoadSourceConfig,
    pub radius_m: f64,
    pub http: HttpConfig,
    pub properties: PropertySearchConfig,
}

impl FacingConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let roads = match lookup("FACING_ROAD_SOURCE").as_deref().map(str::trim) {
            None | Some("") | Some("overpass") => RoadSourceConfig::Overpass {
                url: lookup("OVERPASS_URL").unwrap_or_else(|| DEFAULT_OVERPASS_URL.to_string()),
            },
            Some("file") => RoadSourceConfig::File {
                path: lookup("FACING_ROADS_FILE")
                    .map(PathBuf::from)
                    .ok_or(ConfigError::Missing {
                        key: "FACING_ROADS_FILE",
                        road_source: "file",
                    })?,
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "FACING_ROAD_SOURCE",
                    value: other.to_string(),
                    reason: "expected `overpass` or `file`".to_string(),
                })
            }
        };

        let radius_m: f64 = parse_or(&lookup, "FACING_SEARCH_RADIUS_M", DEFAULT_RADIUS_M)?;
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "FACING_SEARCH_RADIUS_M",
                value: radius_m.to_string(),
                reason: "must be a positive number of metres".to_string(),
            });
        }

        let max_attempts: u32 = parse_or(&lookup, "FACING_MAX_RETRIES", 3)?;
        if max_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "FACING_MAX_RETRIES",
                value: "0".to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }
        let retry = RetryPolicy {
            max_attempts,
            backoff: Duration::from_millis(parse_or(&lookup, "FACING_RETRY_BACKOFF_MS", 1000)?),
            multiplier: 2,
        };

        let http = HttpConfig {
            timeout: Duration::from_secs(parse_or(&lookup, "FACING_HTTP_TIMEOUT_SECS", 30)?),
            requests_per_minute: parse_or(
                &lookup,
                "FACING_REQUESTS_PER_MINUTE",
                NonZeroU32::new(30).unwrap_or(NonZeroU32::MIN),
            )?,
            retry,
        };

        let properties = PropertySearchConfig {
            url: lookup("PROPERTY_SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            page_size: parse_or(&lookup, "PROPERTY_PAGE_SIZE", 100)?,
            max_pages: parse_or(&lookup, "PROPERTY_MAX_PAGES", 1)?,
        };

        Ok(Self {
            roads,
            radius_m,
            http,
            properties,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
