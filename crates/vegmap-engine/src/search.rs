//! Search orchestration: concurrent provider fetches, fusion, ranking.

use vegmap_core::{GeoPoint, SearchFilters};
use vegmap_osm::OverpassClient;
use vegmap_places::PlacesClient;

use crate::error::EngineError;
use crate::fuse::fuse;
use crate::normalize::{normalize, RawProviderRecord};
use crate::rank::{self, RankedPlace};

/// One inbound search: optional free-text query, a required center, and the
/// user filter set.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub center: GeoPoint,
    pub filters: SearchFilters,
}

/// Runs one full search: validate, fetch concurrently, normalize, fuse,
/// rank.
///
/// The three provider fetches (commercial text search, commercial nearby
/// search, open-geodata region fetch) run concurrently and fail
/// independently: a failed fetch is logged and contributes zero records.
/// `max_distance_km` sizes the commercial search radius; it is not applied
/// as a post-fusion filter.
///
/// # Errors
///
/// - [`EngineError::InvalidFilter`] if a filter parameter is out of range
///   (checked before any fetch).
/// - [`EngineError::AllProvidersFailed`] if every fetch failed.
pub async fn search(
    places: &PlacesClient,
    overpass: &OverpassClient,
    region_name: &str,
    request: &SearchRequest,
) -> Result<Vec<RankedPlace>, EngineError> {
    rank::validate_filters(&request.filters)?;

    let query = request
        .query
        .clone()
        .unwrap_or_else(|| default_query(region_name));
    let radius_m = request.filters.max_distance_km * 1000.0;

    let (text, nearby, region) = tokio::join!(
        places.text_search(&query, Some(request.center), radius_m),
        places.nearby_search(request.center, radius_m),
        overpass.fetch_region(region_name),
    );

    let mut failures = 0usize;
    let text = collect_source("places_text", text, &mut failures);
    let nearby = collect_source("places_nearby", nearby, &mut failures);
    let region = collect_source("overpass", region, &mut failures);

    if failures == 3 {
        return Err(EngineError::AllProvidersFailed);
    }

    // Provider order fixes merge precedence: commercial records are walked
    // before open-geodata records.
    let mut raw: Vec<RawProviderRecord> = Vec::new();
    raw.extend(text.into_iter().map(RawProviderRecord::Commercial));
    raw.extend(nearby.into_iter().map(RawProviderRecord::Commercial));
    raw.extend(region.into_iter().map(RawProviderRecord::OpenGeo));

    let normalized: Vec<_> = raw.iter().filter_map(normalize).collect();
    let candidates = normalized.len();

    let unified = fuse(normalized, request.center);
    let results = rank::apply(unified, &request.filters, request.center);

    tracing::info!(
        candidates,
        results = results.len(),
        "search fused and ranked"
    );
    Ok(results)
}

/// Absorbs one provider fetch result: failures are logged and count toward
/// the all-failed check, never raised past this layer.
fn collect_source<T, E: std::fmt::Display>(
    source: &'static str,
    result: Result<Vec<T>, E>,
    failures: &mut usize,
) -> Vec<T> {
    match result {
        Ok(records) => {
            tracing::debug!(source, count = records.len(), "provider fetch succeeded");
            records
        }
        Err(e) => {
            *failures += 1;
            tracing::warn!(source, error = %e, "provider fetch failed; continuing without it");
            Vec::new()
        }
    }
}

fn default_query(region_name: &str) -> String {
    format!("vegetarian OR vegan restaurant in {region_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_names_the_region() {
        assert_eq!(
            default_query("Atlanta"),
            "vegetarian OR vegan restaurant in Atlanta"
        );
    }

    #[test]
    fn collect_source_absorbs_failures() {
        let mut failures = 0;
        let ok: Result<Vec<u8>, EngineError> = Ok(vec![1, 2]);
        assert_eq!(collect_source("a", ok, &mut failures), vec![1, 2]);
        assert_eq!(failures, 0);

        let err: Result<Vec<u8>, EngineError> = Err(EngineError::AllProvidersFailed);
        assert!(collect_source("b", err, &mut failures).is_empty());
        assert_eq!(failures, 1);
    }
}
