use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("failed to read profile {}: {source}", .path.display())]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid analyzer response (status {status}): {source}; body: {preview}")]
    InvalidResponse {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
        preview: String,
    },
    #[error("analyzer unhealthy: status={status} body={body}")]
    Unhealthy { status: StatusCode, body: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SmokeError>;
