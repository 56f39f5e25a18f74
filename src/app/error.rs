use thiserror::Error;

#[derive(Error, Debug)]
pub enum TouchlineError {
    #[error("fetch failed: {0}")]
    Fetch(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    #[error("malformed document: {0}")]
    Parse(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("article not found: {0}")]
    NotFound(String),

    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("bus error: {0}")]
    Bus(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TouchlineError>;
