//! Normalization of raw provider records into the unified schema.
//!
//! Each provider reports a different shape; everything shape-specific is
//! extracted here so the rest of the engine only ever sees
//! [`UnifiedPlace`]. A record missing its name or coordinates is not an
//! error — it is silently dropped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use vegmap_core::{GeoPoint, Provider, UnifiedPlace};
use vegmap_osm::OsmElement;
use vegmap_places::Place;

use crate::score;

/// A raw record as received from one upstream provider, never mutated.
#[derive(Debug, Clone)]
pub enum RawProviderRecord {
    Commercial(Place),
    OpenGeo(OsmElement),
}

/// Cuisine families guessed from the place name. Within a family the first
/// matching pattern wins; independent families may all match.
static CUISINE_RULES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "indian",
            Regex::new("india|indian|biryani|curry").expect("valid indian cuisine regex"),
        ),
        ("thai", Regex::new("thai").expect("valid thai cuisine regex")),
        (
            "ethiopian",
            Regex::new("ethiopia|ethiopian").expect("valid ethiopian cuisine regex"),
        ),
        (
            "mediterranean",
            Regex::new("mediterranean|greek|lebanese|turkish")
                .expect("valid mediterranean cuisine regex"),
        ),
        (
            "mediterranean",
            Regex::new("falafel|hummus").expect("valid mediterranean dish regex"),
        ),
    ]
});

/// Produces zero or one pre-merge [`UnifiedPlace`] from a raw record.
///
/// Returns `None` when the required fields (non-empty name, coordinates)
/// are missing. The friendliness score is computed here, pre-merge; the
/// fusion engine may later revise it upward via its max-wins merge.
#[must_use]
pub fn normalize(record: &RawProviderRecord) -> Option<UnifiedPlace> {
    match record {
        RawProviderRecord::Commercial(place) => normalize_commercial(place),
        RawProviderRecord::OpenGeo(element) => normalize_open_geo(element),
    }
}

fn normalize_commercial(place: &Place) -> Option<UnifiedPlace> {
    let name = place.display_name.as_ref().map(|n| n.text.trim())?;
    if name.is_empty() {
        return None;
    }
    let location = place.location.as_ref()?;

    let friendliness = score::score(name, &place.types);
    let mut provenance = BTreeMap::new();
    if let Some(id) = &place.id {
        provenance.insert(Provider::Google, id.clone());
    }

    Some(UnifiedPlace {
        name: name.to_owned(),
        address: place.formatted_address.clone(),
        location: GeoPoint::new(location.latitude, location.longitude),
        rating: place.rating,
        rating_count: place.user_rating_count,
        price_level: place.price_level,
        cuisines: guess_cuisines(name),
        friendliness_score: friendliness.score,
        friendliness_label: friendliness.label.to_owned(),
        score_reasons: friendliness.reasons,
        provenance,
    })
}

fn normalize_open_geo(element: &OsmElement) -> Option<UnifiedPlace> {
    let name = element.name().map(str::trim)?;
    if name.is_empty() {
        return None;
    }
    let location = element.coordinates()?;

    let categories = open_geo_categories(&element.tags);
    let friendliness = score::score(name, &categories);

    Some(UnifiedPlace {
        name: name.to_owned(),
        address: element.tags.get("addr:full").cloned(),
        location,
        rating: None,
        rating_count: None,
        price_level: None,
        cuisines: guess_cuisines(name),
        friendliness_score: friendliness.score,
        friendliness_label: friendliness.label.to_owned(),
        score_reasons: friendliness.reasons,
        provenance: BTreeMap::from([(Provider::Osm, element.id.to_string())]),
    })
}

/// Maps OSM tags onto the scorer's category vocabulary.
///
/// `amenity=restaurant|cafe` pass through unchanged, `fast_food` becomes
/// `meal_takeaway`, and explicit diet tags become the corresponding
/// veg-restaurant categories so the scorer credits them.
fn open_geo_categories(tags: &BTreeMap<String, String>) -> Vec<String> {
    let mut categories = Vec::new();
    match tags.get("amenity").map(String::as_str) {
        Some("restaurant") => categories.push("restaurant".to_owned()),
        Some("cafe") => categories.push("cafe".to_owned()),
        Some("fast_food") => categories.push("meal_takeaway".to_owned()),
        _ => {}
    }
    if tags.get("diet:vegan").map(String::as_str) == Some("yes") {
        categories.push("vegan_restaurant".to_owned());
    }
    if tags.get("diet:vegetarian").map(String::as_str) == Some("yes") {
        categories.push("vegetarian_restaurant".to_owned());
    }
    categories
}

/// Best-effort cuisine tags guessed from the place name.
fn guess_cuisines(name: &str) -> BTreeSet<String> {
    let name_lower = name.to_lowercase();
    let mut cuisines = BTreeSet::new();
    for (family, pattern) in CUISINE_RULES.iter() {
        if cuisines.contains(*family) {
            continue;
        }
        if pattern.is_match(&name_lower) {
            cuisines.insert((*family).to_owned());
        }
    }
    cuisines
}
