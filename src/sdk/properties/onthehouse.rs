// Client for the onthehouse.com.au composite listing search
use super::source::{Property, PropertyQuery, PropertySource};
use crate::sdk::config::{HttpConfig, PropertySearchConfig};
use crate::sdk::error::ProviderError;
use crate::sdk::orientation::GeoPoint;
use crate::sdk::util::rate_limit::{self, Limiter};
use crate::sdk::util::retry::RetryPolicy;
use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT},
};
use serde::Deserialize;
use serde_json::{json, Value};

pub const DEFAULT_SEARCH_URL: &str = "https://www.onthehouse.com.au/odin/api/composite/search";

const SITE_ORIGIN: &str = "https://www.onthehouse.com.au";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/141.0.0.0 Safari/537.36";

// --- Data structures for parsing search responses ---

#[derive(Deserialize, Debug, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub content: Vec<Listing>,
}

#[derive(Deserialize, Debug)]
pub struct Listing {
    #[serde(default)]
    pub address: Option<ListingAddress>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListingAddress {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub location: Option<ListingLocation>,
}

#[derive(Deserialize, Debug)]
pub struct ListingLocation {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl SearchResponse {
    /// Properties with usable coordinates, in listing order.
    pub fn into_properties(self) -> Vec<Property> {
        let mut properties = Vec::new();
        for listing in self.content {
            let Some(address) = listing.address else {
                log::warn!("Listing without an address, skipping.");
                continue;
            };
            let name = address
                .formatted_address
                .unwrap_or_else(|| "Unknown Address".to_string());

            match address.location {
                Some(ListingLocation {
                    lat: Some(lat),
                    lon: Some(lon),
                }) => properties.push(Property {
                    address: name,
                    location: GeoPoint::new(lat, lon),
                }),
                _ => log::warn!("Property missing coordinates, skipping: {}", name),
            }
        }
        properties
    }
}

pub struct OnTheHouseSource {
    client: Client,
    url: String,
    page_size: u32,
    max_pages: u32,
    limiter: Limiter,
    retry: RetryPolicy,
}

impl OnTheHouseSource {
    pub fn new(search: &PropertySearchConfig, http: &HttpConfig, limiter: Limiter) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(http.timeout).build()?,
            url: search.url.clone(),
            page_size: search.page_size.max(1),
            max_pages: search.max_pages.max(1),
            limiter,
            retry: http.retry,
        })
    }

    /// JSON body for one page of current sale listings in the suburb.
    pub fn search_body(query: &PropertyQuery, page: u32, page_size: u32) -> Value {
        json!({
            "size": page_size,
            "number": page,
            "sort": [{ "listing.listedDate": "desc" }],
            "query": {
                "queries": [{
                    "category": "SaleListing",
                    "status": "current",
                    "stateCode": query.state,
                    "suburb": query.suburb,
                    "postCode": query.postcode,
                }]
            }
        })
    }

    /// Listing page URL the site itself would send as the referer.
    pub fn referer(query: &PropertyQuery) -> String {
        let suburb = query
            .suburb
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        format!(
            "{}/property-for-sale/{}/{}-{}",
            SITE_ORIGIN,
            query.state.to_lowercase(),
            suburb,
            query.postcode
        )
    }

    fn headers(query: &PropertyQuery) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json;charset=UTF-8"));
        headers.insert(ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        if let Ok(referer) = HeaderValue::from_str(&Self::referer(query)) {
            headers.insert(REFERER, referer);
        }
        headers
    }

    fn fetch_page(&self, query: &PropertyQuery, page: u32) -> Result<SearchResponse, ProviderError> {
        rate_limit::wait(&self.limiter);
        let body = Self::search_body(query, page, self.page_size);

        let response = self
            .client
            .post(&self.url)
            .headers(Self::headers(query))
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            log::error!("Property search returned non-success status: {}", status);
            return Err(ProviderError::ApiError {
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!("Failed to parse property search response. Page: {}\nError: {}", page, e);
            e.into()
        })
    }
}

impl PropertySource for OnTheHouseSource {
    fn fetch_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>, ProviderError> {
        let mut properties = Vec::new();

        for page in 0..self.max_pages {
            log::debug!("[PROVIDER] Fetching listing page {} for {}", page, query);
            let response = self
                .retry
                .run("properties", |_| self.fetch_page(query, page))?;

            let listed = response.content.len();
            properties.extend(response.into_properties());

            if listed < self.page_size as usize {
                break;
            }
        }

        log::info!("Fetched {} properties with coordinates for {}", properties.len(), query);
        Ok(properties)
    }
}
