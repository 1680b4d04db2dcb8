//! Error types for tome.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TomeError>;

#[derive(Debug, Error)]
pub enum TomeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("ingest error: {0}")]
    Ingest(String),
}
