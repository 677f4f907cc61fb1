use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let google_places_api_key = require("GOOGLE_PLACES_API_KEY")?;

    let env = parse_environment(&or_default("VEGMAP_ENV", "development"));
    let bind_addr = parse_addr("VEGMAP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VEGMAP_LOG_LEVEL", "info");
    let region_name = or_default("VEGMAP_REGION_NAME", "Atlanta");

    let provider_timeout_secs = parse_u64("VEGMAP_PROVIDER_TIMEOUT_SECS", "30")?;
    let provider_max_retries = parse_u32("VEGMAP_PROVIDER_MAX_RETRIES", "3")?;
    let provider_retry_backoff_base_ms =
        parse_u64("VEGMAP_PROVIDER_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        region_name,
        google_places_api_key,
        provider_timeout_secs,
        provider_max_retries,
        provider_retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid values.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("GOOGLE_PLACES_API_KEY", "test-key");
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_places_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_PLACES_API_KEY"),
            "expected MissingEnvVar(GOOGLE_PLACES_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_applies_defaults() {
        let map = full_env();
        let config = build_app_config(lookup_from_map(&map)).expect("config should build");
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.region_name, "Atlanta");
        assert_eq!(config.provider_timeout_secs, 30);
        assert_eq!(config.provider_max_retries, 3);
        assert_eq!(config.provider_retry_backoff_base_ms, 1000);
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = full_env();
        map.insert("VEGMAP_ENV", "production");
        map.insert("VEGMAP_BIND_ADDR", "127.0.0.1:8080");
        map.insert("VEGMAP_REGION_NAME", "Decatur");
        map.insert("VEGMAP_PROVIDER_MAX_RETRIES", "0");
        let config = build_app_config(lookup_from_map(&map)).expect("config should build");
        assert_eq!(config.env, Environment::Production);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.region_name, "Decatur");
        assert_eq!(config.provider_max_retries, 0);
    }

    #[test]
    fn build_app_config_rejects_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("VEGMAP_BIND_ADDR", "not-an-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VEGMAP_BIND_ADDR"),
            "expected InvalidEnvVar(VEGMAP_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_invalid_retry_count() {
        let mut map = full_env();
        map.insert("VEGMAP_PROVIDER_MAX_RETRIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VEGMAP_PROVIDER_MAX_RETRIES"),
            "expected InvalidEnvVar(VEGMAP_PROVIDER_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let map = full_env();
        let config = build_app_config(lookup_from_map(&map)).expect("config should build");
        let debug = format!("{config:?}");
        assert!(!debug.contains("test-key"), "api key leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
