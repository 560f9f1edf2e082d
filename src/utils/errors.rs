use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    HttpRequestError(#[from] reqwest::Error),

    #[error("Failed to decode OpenList response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(String),
}
