//! HTTP client for the Overpass API interpreter endpoint.

use std::time::Duration;

use reqwest::Client;

use crate::error::OverpassError;
use crate::types::{OsmElement, OverpassResponse};

const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Server-side evaluation timeout written into every query.
const QUERY_TIMEOUT_SECS: u32 = 25;

/// Client for the Overpass API.
///
/// Use [`OverpassClient::new`] for the public interpreter or
/// [`OverpassClient::with_base_url`] to point at a mock server in tests.
pub struct OverpassClient {
    client: Client,
    endpoint: String,
}

impl OverpassClient {
    /// Creates a new client pointed at the public Overpass interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, OverpassError> {
        Self::with_base_url(timeout_secs, DEFAULT_ENDPOINT)
    }

    /// Creates a new client with a custom interpreter URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(timeout_secs: u64, endpoint: &str) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vegmap/0.1 (veg-place-search)")
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Fetches all veg-tagged eateries inside the named administrative area.
    ///
    /// Queries nodes, ways and relations with
    /// `amenity ∈ {restaurant, cafe, fast_food}` carrying `diet:vegan=yes`
    /// or `diet:vegetarian=yes`, and asks Overpass for `center` coordinates
    /// so ways and relations are usable as points.
    ///
    /// # Errors
    ///
    /// - [`OverpassError::Http`] on network failure or a non-2xx status.
    /// - [`OverpassError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_region(&self, region_name: &str) -> Result<Vec<OsmElement>, OverpassError> {
        let query = region_query(region_name);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let decoded: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Deserialize { source: e })?;

        tracing::debug!(
            region = region_name,
            count = decoded.elements.len(),
            "overpass region fetch complete"
        );
        Ok(decoded.elements)
    }
}

/// Builds the Overpass QL query for one administrative area.
///
/// The region name is interpolated into a quoted tag filter; double quotes
/// are stripped so a caller-supplied name cannot break out of it.
fn region_query(region_name: &str) -> String {
    let area = region_name.replace('"', "");
    format!(
        r#"[out:json][timeout:{QUERY_TIMEOUT_SECS}];
area["boundary"="administrative"]["name"="{area}"]["admin_level"~"^8$"]->.region;
(
  nwr(area.region)["amenity"~"^(restaurant|cafe|fast_food)$"]["diet:vegan"="yes"];
  nwr(area.region)["amenity"~"^(restaurant|cafe|fast_food)$"]["diet:vegetarian"="yes"];
);
out center tags;"#
    )
}
