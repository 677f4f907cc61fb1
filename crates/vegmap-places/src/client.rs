//! HTTP client for the Google Places API v1 search endpoints.

use std::time::Duration;

use reqwest::{Client, Url};

use vegmap_core::GeoPoint;

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{Place, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/";

/// Field mask sent with every search request; [`Place`](crate::types::Place)
/// models exactly these fields.
const FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.rating,places.userRatingCount,places.priceLevel,places.types,places.location";

/// Results requested per search call; the API caps both endpoints at 20.
const PAGE_SIZE: u32 = 20;

/// Client for the Google Places API v1.
///
/// Manages the HTTP client, API key, and base URL. Use [`PlacesClient::new`]
/// for production or [`PlacesClient::with_base_url`] to point at a mock
/// server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vegmap/0.1 (veg-place-search)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining the endpoint path appends rather than replaces.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Overrides the default retry policy (3 retries, 1 s base back-off).
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Free-text search (`places:searchText`), optionally biased to a circle
    /// of `radius_m` metres around `center`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the API returns a non-2xx status.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn text_search(
        &self,
        query: &str,
        center: Option<GeoPoint>,
        radius_m: f64,
    ) -> Result<Vec<Place>, PlacesError> {
        let mut body = serde_json::json!({
            "textQuery": query,
            "pageSize": PAGE_SIZE,
            "languageCode": "en",
            "regionCode": "US",
        });
        if let Some(center) = center {
            body["locationBias"] = serde_json::json!({
                "circle": {
                    "center": { "latitude": center.lat, "longitude": center.lng },
                    "radius": radius_m,
                }
            });
        }
        self.search("v1/places:searchText", &body).await
    }

    /// Nearby search (`places:searchNearby`) for restaurants and cafes
    /// within `radius_m` metres of `center`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the API returns a non-2xx status.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn nearby_search(
        &self,
        center: GeoPoint,
        radius_m: f64,
    ) -> Result<Vec<Place>, PlacesError> {
        let body = serde_json::json!({
            "includedTypes": ["restaurant", "cafe"],
            "maxResultCount": PAGE_SIZE,
            "locationRestriction": {
                "circle": {
                    "center": { "latitude": center.lat, "longitude": center.lng },
                    "radius": radius_m,
                }
            },
            "languageCode": "en",
        });
        self.search("v1/places:searchNearby", &body).await
    }

    async fn search(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<Place>, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.post_search(path, body)
        })
        .await
    }

    /// Sends one POST request with the API key and field mask headers, and
    /// decodes the response body.
    async fn post_search(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;

        let response = self
            .client
            .post(url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        let decoded: SearchResponse =
            serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
                context: path.to_owned(),
                source: e,
            })?;
        Ok(decoded.places)
    }
}

/// Pulls `error.message` out of a Places API error body, falling back to the
/// raw body (truncated) when it is not the documented JSON shape.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}
