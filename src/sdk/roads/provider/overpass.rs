use super::types::OverpassResponse;
use crate::sdk::config::HttpConfig;
use crate::sdk::error::ProviderError;
use crate::sdk::orientation::{GeoPoint, RoadGeometry};
use crate::sdk::roads::service::RoadSetProvider;
use crate::sdk::util::rate_limit::{self, Limiter};
use crate::sdk::util::retry::RetryPolicy;
use reqwest::blocking::Client;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Seconds Overpass may spend evaluating one query server-side.
const QUERY_TIMEOUT_SECS: u64 = 25;

/// Fetches `highway=*` ways around a point from an Overpass API endpoint.
pub struct OverpassProvider {
    client: Client,
    url: String,
    limiter: Limiter,
    retry: RetryPolicy,
}

impl OverpassProvider {
    pub fn new(url: String, http: &HttpConfig, limiter: Limiter) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(http.timeout).build()?,
            url,
            limiter,
            retry: http.retry,
        })
    }

    /// Overpass QL selecting every highway way within `radius_m` of `point`,
    /// returned with inline geometry.
    pub fn build_query(point: GeoPoint, radius_m: f64) -> String {
        format!(
            "[out:json][timeout:{}];\n(\n  way(around:{},{},{})[\"highway\"];\n);\nout geom;",
            QUERY_TIMEOUT_SECS, radius_m, point.lat, point.lon
        )
    }

    fn fetch_once(&self, query: &str) -> Result<OverpassResponse, ProviderError> {
        rate_limit::wait(&self.limiter);

        let response = match self.client.post(&self.url).form(&[("data", query)]).send() {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("Failed to send POST request to Overpass. URL: {}\nError: {}", self.url, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            log::error!(
                "Overpass returned non-success status: {}. Body: {}",
                status,
                truncate(&text, 300)
            );
            return Err(ProviderError::ApiError {
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        parse_response(&text)
    }
}

/// Parses an Overpass JSON body, turning a runtime-error remark into an error.
pub fn parse_response(text: &str) -> Result<OverpassResponse, ProviderError> {
    let response: OverpassResponse = serde_json::from_str(text).map_err(|e| {
        log::error!(
            "Failed to parse Overpass response.\nError: {}. Body: {}",
            e,
            truncate(text, 300)
        );
        e
    })?;

    if let Some(remark) = response.runtime_error() {
        return Err(ProviderError::RawApiError(remark.to_string()));
    }
    Ok(response)
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

impl RoadSetProvider for OverpassProvider {
    fn fetch_roads_near(&self, point: GeoPoint, radius_m: f64) -> Result<Vec<RoadGeometry>, ProviderError> {
        log::debug!(
            "[PROVIDER] Calling Overpass for roads within {} m of {}",
            radius_m,
            point
        );
        let query = Self::build_query(point, radius_m);
        let response = self.retry.run("overpass data", |_| self.fetch_once(&query))?;

        let roads = response.into_roads();
        log::debug!("[PROVIDER] Overpass returned {} roads near {}", roads.len(), point);
        Ok(roads)
    }
}
