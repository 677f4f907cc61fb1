use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Administrative area the open-geodata provider is queried for.
    pub region_name: String,
    pub google_places_api_key: String,
    pub provider_timeout_secs: u64,
    pub provider_max_retries: u32,
    pub provider_retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("region_name", &self.region_name)
            .field("google_places_api_key", &"[redacted]")
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("provider_max_retries", &self.provider_max_retries)
            .field(
                "provider_retry_backoff_base_ms",
                &self.provider_retry_backoff_base_ms,
            )
            .finish()
    }
}
