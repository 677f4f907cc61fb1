//! The unified place schema and search filter set.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Upstream data source that can contribute records to a unified place.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Osm,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Google => write!(f, "google"),
            Provider::Osm => write!(f, "osm"),
        }
    }
}

/// One believed-distinct physical place, merged from one or more providers.
///
/// Built fresh per search request by the fusion engine and discarded once
/// the response is returned; nothing outside the engine mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedPlace {
    /// Non-empty after normalization; records without a name are dropped.
    pub name: String,
    pub address: Option<String>,
    pub location: GeoPoint,
    /// 0.0–5.0 where present.
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    /// 0–4 where present.
    pub price_level: Option<u8>,
    /// Lower-case cuisine tags; may be empty.
    pub cuisines: BTreeSet<String>,
    /// 0–100, always present.
    pub friendliness_score: u8,
    /// Derived solely from `friendliness_score` thresholds.
    pub friendliness_label: String,
    /// Ordered reasoning lines from the scorer.
    pub score_reasons: Vec<String>,
    /// Provider → provider-native id. Entries are only ever added during a
    /// merge, never removed.
    pub provenance: BTreeMap<Provider, String>,
}

/// User-supplied result filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Sizes the commercial provider's search radius; not a post-fusion
    /// filter.
    pub max_distance_km: f64,
    /// 0–5; places with no rating count as 0.
    pub min_rating: f64,
    /// Exact price level match, 0–4; places with no price level never match.
    pub price: Option<u8>,
    /// Exact lower-cased cuisine tag.
    pub cuisine: Option<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            max_distance_km: 20.0,
            min_rating: 0.0,
            price: None,
            cuisine: None,
        }
    }
}
