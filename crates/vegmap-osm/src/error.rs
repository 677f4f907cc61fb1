use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverpassError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode overpass response: {source}")]
    Deserialize { source: serde_json::Error },
}
