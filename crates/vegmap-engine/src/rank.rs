//! User-filter application and final result shaping.
//!
//! The filters are independent predicates, applied in a fixed order to the
//! fusion engine's already-sorted output. Filtering never reorders; the
//! only additions are the display distance and the result cap.

use serde::Serialize;

use vegmap_core::{distance_km, GeoPoint, SearchFilters, UnifiedPlace};

use crate::error::EngineError;

/// Maximum entries returned to the caller.
pub const MAX_RESULTS: usize = 30;

/// A unified place annotated with its distance from the query center.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlace {
    #[serde(flatten)]
    pub place: UnifiedPlace,
    pub distance_km: f64,
}

/// Rejects out-of-range filter parameters.
///
/// Runs before any provider fetch; values are never silently clamped.
///
/// # Errors
///
/// Returns [`EngineError::InvalidFilter`] when `min_rating` is outside 0–5
/// or `price` is outside 0–4.
pub fn validate_filters(filters: &SearchFilters) -> Result<(), EngineError> {
    if !(0.0..=5.0).contains(&filters.min_rating) {
        return Err(EngineError::InvalidFilter(format!(
            "min_rating must be between 0 and 5, got {}",
            filters.min_rating
        )));
    }
    if let Some(price) = filters.price {
        if price > 4 {
            return Err(EngineError::InvalidFilter(format!(
                "price must be between 0 and 4, got {price}"
            )));
        }
    }
    Ok(())
}

/// Applies the user filters to the fused list and shapes the final result.
///
/// - Entries with `rating < min_rating` are dropped; an absent rating counts
///   as 0, so any positive `min_rating` excludes unrated places.
/// - When `price` is set, only an exact `price_level` match survives; an
///   absent `price_level` never matches.
/// - When `cuisine` is set, the entry's cuisine set must contain the exact
///   lower-cased tag.
/// - Survivors are annotated with their distance from `center` (display
///   only, order is untouched) and truncated to [`MAX_RESULTS`].
#[must_use]
pub fn apply(
    unified: Vec<UnifiedPlace>,
    filters: &SearchFilters,
    center: GeoPoint,
) -> Vec<RankedPlace> {
    let cuisine = filters.cuisine.as_ref().map(|c| c.to_lowercase());

    unified
        .into_iter()
        .filter(|place| place.rating.unwrap_or(0.0) >= filters.min_rating)
        .filter(|place| {
            filters
                .price
                .is_none_or(|price| place.price_level == Some(price))
        })
        .filter(|place| {
            cuisine
                .as_ref()
                .is_none_or(|cuisine| place.cuisines.contains(cuisine))
        })
        .map(|place| {
            let distance = distance_km(center, place.location);
            RankedPlace {
                place,
                distance_km: distance,
            }
        })
        .take(MAX_RESULTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;

    fn center() -> GeoPoint {
        GeoPoint::new(33.7490, -84.3880)
    }

    fn place(name: &str) -> UnifiedPlace {
        UnifiedPlace {
            name: name.to_owned(),
            address: None,
            location: GeoPoint::new(33.7500, -84.3880),
            rating: None,
            rating_count: None,
            price_level: None,
            cuisines: BTreeSet::new(),
            friendliness_score: 0,
            friendliness_label: "Minimal Veg Options".to_owned(),
            score_reasons: vec![],
            provenance: BTreeMap::new(),
        }
    }

    fn filters() -> SearchFilters {
        SearchFilters::default()
    }

    #[test]
    fn min_rating_drops_unrated_and_low_rated() {
        let mut high = place("High");
        high.rating = Some(4.5);
        let mut low = place("Low");
        low.rating = Some(3.9);
        let unrated = place("Unrated");

        let mut f = filters();
        f.min_rating = 4.0;

        let result = apply(vec![high, low, unrated], &f, center());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].place.name, "High");
    }

    #[test]
    fn min_rating_zero_keeps_unrated_places() {
        let unrated = place("Unrated");
        let result = apply(vec![unrated], &filters(), center());
        assert_eq!(result.len(), 1, "absent rating counts as 0, not missing");
    }

    #[test]
    fn price_filter_requires_exact_match() {
        let mut cheap = place("Cheap");
        cheap.price_level = Some(1);
        let mut mid = place("Mid");
        mid.price_level = Some(2);
        let unpriced = place("Unpriced");

        let mut f = filters();
        f.price = Some(2);

        let result = apply(vec![cheap, mid, unpriced], &f, center());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].place.name, "Mid");
    }

    #[test]
    fn cuisine_filter_matches_exact_lowercased_tag() {
        let mut thai = place("Thai Spot");
        thai.cuisines.insert("thai".to_owned());
        let plain = place("Plain Spot");

        let mut f = filters();
        f.cuisine = Some("Thai".to_owned());

        let result = apply(vec![thai, plain], &f, center());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].place.name, "Thai Spot");
    }

    #[test]
    fn filters_preserve_incoming_order() {
        let mut a = place("A");
        a.rating = Some(4.8);
        let mut b = place("B");
        b.rating = Some(4.1);
        let mut c = place("C");
        c.rating = Some(4.0);

        let mut f = filters();
        f.min_rating = 4.0;

        let result = apply(vec![a, b, c], &f, center());
        let names: Vec<&str> = result.iter().map(|r| r.place.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn distance_annotation_measures_from_center() {
        let result = apply(vec![place("A")], &filters(), center());
        // ~0.11 km north of center.
        assert!(
            result[0].distance_km > 0.09 && result[0].distance_km < 0.13,
            "got {}",
            result[0].distance_km
        );
    }

    #[test]
    fn result_list_is_capped() {
        let many: Vec<UnifiedPlace> = (0..50).map(|i| place(&format!("P{i}"))).collect();
        let result = apply(many, &filters(), center());
        assert_eq!(result.len(), MAX_RESULTS);
        assert_eq!(result[0].place.name, "P0", "cap truncates the tail");
    }

    #[test]
    fn apply_is_deterministic() {
        let build = || {
            let mut a = place("A");
            a.rating = Some(4.0);
            a.cuisines.insert("thai".to_owned());
            let mut b = place("B");
            b.cuisines.insert("thai".to_owned());
            vec![a, b]
        };
        let mut f = filters();
        f.cuisine = Some("thai".to_owned());

        let once = apply(build(), &f, center());
        let twice = apply(build(), &f, center());
        let names =
            |list: &[RankedPlace]| list.iter().map(|r| r.place.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(validate_filters(&filters()).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_min_rating() {
        let mut f = filters();
        f.min_rating = 5.5;
        let err = validate_filters(&f).expect_err("5.5 is out of range");
        assert!(matches!(err, EngineError::InvalidFilter(_)));

        f.min_rating = -0.1;
        assert!(validate_filters(&f).is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_price() {
        let mut f = filters();
        f.price = Some(5);
        let err = validate_filters(&f).expect_err("5 is out of range");
        assert!(matches!(err, EngineError::InvalidFilter(_)));
    }

    #[test]
    fn validate_accepts_boundary_values() {
        let mut f = filters();
        f.min_rating = 5.0;
        f.price = Some(4);
        assert!(validate_filters(&f).is_ok());
        f.min_rating = 0.0;
        f.price = Some(0);
        assert!(validate_filters(&f).is_ok());
    }
}
