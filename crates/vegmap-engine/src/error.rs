use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A filter parameter was out of range. Raised before any provider
    /// fetch runs; values are never silently clamped.
    #[error("invalid filter parameter: {0}")]
    InvalidFilter(String),

    /// Every provider fetch failed; there is no data to fuse.
    #[error("all providers failed; no results available")]
    AllProvidersFailed,
}
