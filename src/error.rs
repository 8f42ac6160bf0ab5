use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    /// Non-2xx API response, message enriched with provider detail.
    #[error("{message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("token refresh failed: {0}")]
    Refresh(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
