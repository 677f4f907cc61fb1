//! Overpass API response types.

use std::collections::BTreeMap;

use serde::Deserialize;

use vegmap_core::GeoPoint;

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OsmElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

/// Way/relation centroid emitted by `out center`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// One raw OSM element. Nodes carry `lat`/`lon` directly; ways and
/// relations carry a computed `center` instead.
#[derive(Debug, Clone, Deserialize)]
pub struct OsmElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OsmElement {
    /// Resolved coordinates: the `center` when present, otherwise the
    /// node's own `lat`/`lon`. `None` when the element carries neither.
    #[must_use]
    pub fn coordinates(&self) -> Option<GeoPoint> {
        if let Some(center) = self.center {
            return Some(GeoPoint::new(center.lat, center.lon));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// The `name` tag, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }
}
