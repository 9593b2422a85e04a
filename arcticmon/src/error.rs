//! Errors raised while talking to the dashboard server.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("URL cannot carry a path: {0}")]
    NotABase(String),

    #[error("reading TLS CA: {0}")]
    Io(#[from] std::io::Error),

    #[error("live stream ended")]
    StreamEnded,
}

pub type ClientResult<T> = Result<T, ClientError>;
