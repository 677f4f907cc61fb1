use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("places API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to decode places response from {context}: {source}")]
    Deserialize {
        context: String,
        source: serde_json::Error,
    },
}
