use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Number;

use crate::{
    error::GeocodeError,
    model::{GeocodeRequest, LocationMatch},
    provider::ProviderId,
};

use super::GeocodeProvider;

/// Bing Maps REST Locations endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://dev.virtualearth.net/REST/v1/Locations";

const CULTURE: &str = "en-AU";
const USER_REGION: &str = "AU";

#[derive(Debug, Clone)]
pub struct BingMapsProvider {
    api_key: String,
    endpoint: String,
    http: Client,
    timeout: Option<Duration>,
}

impl BingMapsProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            http: Client::new(),
            timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Bound each request. Without this the call waits as long as the server does.
    /// Applied per request, so it holds whichever client is in use.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full request URL. The provider expects the parameters in this order.
    pub fn request_url(&self, request: &GeocodeRequest) -> Result<Url, GeocodeError> {
        let inclnb = if request.include_neighbourhood { "1" } else { "0" };
        let max_results = request.max_results.to_string();

        Url::parse_with_params(
            &self.endpoint,
            &[
                ("culture", CULTURE),
                ("query", request.address.as_str()),
                ("inclnb", inclnb),
                ("include", "queryParse"),
                ("maxResults", max_results.as_str()),
                ("userRegion", USER_REGION),
                ("key", self.api_key.as_str()),
            ],
        )
        .map_err(|e| {
            GeocodeError::Config(format!(
                "Invalid Bing Maps endpoint '{}': {e}",
                self.endpoint
            ))
        })
    }
}

/// Copy of `url` with the `key` value masked, for logging.
fn redact_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" {
                "REDACTED".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingResponse {
    resource_sets: Vec<BingResourceSet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingResourceSet {
    estimated_total: u64,
    #[serde(default)]
    resources: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct BingPoint {
    coordinates: [Number; 2],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingAddress {
    formatted_address: String,
    country_region: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingLocation {
    point: BingPoint,
    bbox: [Number; 4],
    confidence: String,
    entity_type: String,
    #[serde(default)]
    match_codes: Vec<String>,
    address: BingAddress,
}

impl From<BingLocation> for LocationMatch {
    fn from(loc: BingLocation) -> Self {
        let [latitude, longitude] = loc.point.coordinates;
        LocationMatch {
            latitude,
            longitude,
            bounding_box: loc.bbox,
            confidence: loc.confidence,
            entity_type: loc.entity_type,
            match_codes: loc.match_codes,
            formatted_address: loc.address.formatted_address,
            country_region: loc.address.country_region,
        }
    }
}

/// Map a Locations API response body into matches, in response order.
pub fn parse_locations(body: &str) -> Result<Vec<LocationMatch>, GeocodeError> {
    let parsed: BingResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::parse("body", e))?;

    let set = parsed
        .resource_sets
        .into_iter()
        .next()
        .ok_or_else(|| {
            GeocodeError::parse("resourceSets", "expected at least one resource set")
        })?;

    if set.estimated_total == 0 {
        return Err(GeocodeError::NoResults);
    }

    set.resources
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let loc: BingLocation = serde_json::from_value(raw).map_err(|e| {
                GeocodeError::parse(format!("resourceSets[0].resources[{i}]"), e)
            })?;
            Ok(loc.into())
        })
        .collect()
}

#[async_trait]
impl GeocodeProvider for BingMapsProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Bing
    }

    async fn locate(&self, request: &GeocodeRequest) -> Result<Vec<LocationMatch>, GeocodeError> {
        let url = self.request_url(request)?;

        tracing::debug!(url = %redact_key(&url), "Sending Bing Maps location query");

        let mut req = self.http.get(url);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        // Strip the URL from transport errors; it carries the key.
        let res = req.send().await.map_err(|e| {
            GeocodeError::Transport(format!("Failed to send request: {}", e.without_url()))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            GeocodeError::Transport(format!("Failed to read response body: {}", e.without_url()))
        })?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeocodeError::InvalidKey(format!(
                "status {status}: {}",
                truncate_body(&body)
            )));
        }

        if !status.is_success() {
            tracing::warn!(%status, "Bing Maps returned a non-success status");
            return Err(GeocodeError::Transport(format!(
                "status {status}: {}",
                truncate_body(&body)
            )));
        }

        parse_locations(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
