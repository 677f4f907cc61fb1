//! Shared domain types and configuration for vegmap.
//!
//! Holds everything the provider clients, fusion engine, server and CLI all
//! need to agree on: geographic primitives, the unified place schema, the
//! search filter set, and environment-driven application configuration.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, GeoPoint, EARTH_RADIUS_KM};
pub use types::{Provider, SearchFilters, UnifiedPlace};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
