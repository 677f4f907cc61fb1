//! Multi-provider record fusion: deduplication, merge, default ordering.
//!
//! Walks the provider-concatenated input in order, folds records that
//! describe the same physical place into one entry, and sorts the result
//! into the default presentation order. Merge semantics depend on input
//! order — commercial sources are normalized ahead of open geodata, so
//! their scalar fields win by construction.

use vegmap_core::{distance_km, GeoPoint, UnifiedPlace};

/// Records within this distance whose names match case-insensitively are
/// considered the same physical place. Hand-tuned alongside the score
/// weights; change deliberately.
pub const DEDUP_RADIUS_KM: f64 = 0.1;

/// Deduplicates and merges normalized records into one unified list,
/// sorted rating-descending, then distance-from-`center` ascending, then
/// friendliness-descending.
///
/// The dedup scan is O(n²) over the candidate set. Batches stay small
/// (≤ ~60 records per query), and the linear scan is what makes the
/// first-non-null merge order well-defined — replacing it with a spatial
/// index would change which record's scalar fields win.
#[must_use]
pub fn fuse(records: Vec<UnifiedPlace>, center: GeoPoint) -> Vec<UnifiedPlace> {
    let mut unified: Vec<UnifiedPlace> = Vec::with_capacity(records.len());

    for record in records {
        match unified.iter_mut().find(|u| is_same_place(u, &record)) {
            Some(existing) => merge_into(existing, record),
            None => unified.push(record),
        }
    }

    sort_default(&mut unified, center);
    unified
}

/// The dedup predicate: case-insensitive name equality AND proximity within
/// [`DEDUP_RADIUS_KM`]. A conjunction — no fuzzy matching, no partial
/// credit.
fn is_same_place(a: &UnifiedPlace, b: &UnifiedPlace) -> bool {
    a.name.to_lowercase() == b.name.to_lowercase()
        && distance_km(a.location, b.location) <= DEDUP_RADIUS_KM
}

/// Folds `incoming` into `existing`.
///
/// Scalar fields are first-non-null-wins: a later duplicate only fills a
/// field that is still unset. The friendliness score is max-wins (either
/// source may catch a veg signal the other missed); label and reasons
/// follow the winning score. Provenance and cuisines are unions.
fn merge_into(existing: &mut UnifiedPlace, incoming: UnifiedPlace) {
    if existing.rating.is_none() {
        existing.rating = incoming.rating;
    }
    if existing.rating_count.is_none() {
        existing.rating_count = incoming.rating_count;
    }
    if existing.price_level.is_none() {
        existing.price_level = incoming.price_level;
    }
    if existing.address.is_none() {
        existing.address = incoming.address;
    }

    if incoming.friendliness_score > existing.friendliness_score {
        existing.friendliness_score = incoming.friendliness_score;
        existing.friendliness_label = incoming.friendliness_label;
        existing.score_reasons = incoming.score_reasons;
    }

    existing.cuisines.extend(incoming.cuisines);
    for (provider, id) in incoming.provenance {
        existing.provenance.entry(provider).or_insert(id);
    }
}

/// Default presentation order: rating desc (absent rating counts as 0),
/// then distance from `center` asc, then friendliness score desc. The sort
/// is stable, so records that tie on all three keys keep insertion order.
fn sort_default(unified: &mut [UnifiedPlace], center: GeoPoint) {
    unified.sort_by(|a, b| {
        b.rating
            .unwrap_or(0.0)
            .total_cmp(&a.rating.unwrap_or(0.0))
            .then_with(|| {
                distance_km(center, a.location).total_cmp(&distance_km(center, b.location))
            })
            .then_with(|| b.friendliness_score.cmp(&a.friendliness_score))
    });
}
