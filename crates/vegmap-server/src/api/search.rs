use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use vegmap_core::{GeoPoint, SearchFilters};
use vegmap_engine::{EngineError, RankedPlace, SearchRequest};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Query parameters for `GET /api/v1/search`.
///
/// `lat`/`lng` are required; everything else falls back to the engine
/// defaults. Out-of-range `min_rating`/`price` are rejected by the engine,
/// not clamped.
#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    q: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    max_km: Option<f64>,
    min_rating: Option<f64>,
    price: Option<u8>,
    cuisine: Option<String>,
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<RankedPlace>>>, ApiError> {
    let (Some(lat), Some(lng)) = (params.lat, params.lng) else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "query parameters 'lat' and 'lng' are required",
        ));
    };

    let defaults = SearchFilters::default();
    let request = SearchRequest {
        query: params.q,
        center: GeoPoint::new(lat, lng),
        filters: SearchFilters {
            max_distance_km: params.max_km.unwrap_or(defaults.max_distance_km),
            min_rating: params.min_rating.unwrap_or(defaults.min_rating),
            price: params.price,
            cuisine: params.cuisine,
        },
    };

    let results = vegmap_engine::search(
        &state.places,
        &state.overpass,
        &state.config.region_name,
        &request,
    )
    .await
    .map_err(|e| map_engine_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: results,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_engine_error(request_id: String, error: &EngineError) -> ApiError {
    match error {
        EngineError::InvalidFilter(message) => {
            ApiError::new(request_id, "validation_error", message.clone())
        }
        EngineError::AllProvidersFailed => {
            tracing::error!(error = %error, "search had no provider data");
            ApiError::new(
                request_id,
                "upstream_unavailable",
                "all providers failed; try again later",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_maps_to_validation_error() {
        let err = map_engine_error(
            "req-1".to_owned(),
            &EngineError::InvalidFilter("price must be between 0 and 4, got 9".to_owned()),
        );
        assert_eq!(err.error.code, "validation_error");
        assert!(err.error.message.contains("price"));
    }

    #[test]
    fn all_providers_failed_maps_to_upstream_unavailable() {
        let err = map_engine_error("req-1".to_owned(), &EngineError::AllProvidersFailed);
        assert_eq!(err.error.code, "upstream_unavailable");
    }
}
