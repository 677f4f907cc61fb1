//! HTTP client for the OpenStreetMap Overpass API.
//!
//! Fetches restaurant/cafe/fast-food elements tagged `diet:vegan=yes` or
//! `diet:vegetarian=yes` inside a named administrative area, as raw
//! [`OsmElement`]s for the normalizer to consume.

pub mod client;
pub mod error;
pub mod types;

pub use client::OverpassClient;
pub use error::OverpassError;
pub use types::{Center, ElementKind, OsmElement};
