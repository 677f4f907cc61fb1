//! Google Places API v1 response types.
//!
//! Only the fields named in the request field mask are modeled; everything
//! else the API could return is ignored. All fields are optional on the wire
//! — the normalizer decides what is required.

use serde::Deserialize;

/// Envelope for both `searchText` and `searchNearby` responses.
///
/// The API omits `places` entirely when a search matches nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

/// One place result.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Place {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    /// 0.0–5.0.
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    /// 0–4.
    pub price_level: Option<u8>,
    pub types: Vec<String>,
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}
