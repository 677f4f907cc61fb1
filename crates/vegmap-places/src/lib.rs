//! HTTP client for the Google Places API (v1).
//!
//! Wraps `reqwest` with the headers the Places API requires (`X-Goog-Api-Key`
//! and an explicit field mask), typed response deserialization, and retry
//! with exponential back-off on transient failures. Only the two search
//! endpoints the discovery flow needs are implemented: `places:searchText`
//! and `places:searchNearby`.

pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::{LatLng, LocalizedText, Place};
