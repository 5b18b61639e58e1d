//! Crate error type
//!
//! Only the outer surfaces return errors. Attribute extraction is total and
//! storage faults are absorbed by the filter state store.

/// Errors raised by the listing filter core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("a page load is already running")]
    LoadInProgress,
    #[error("no listing container found in document")]
    ContainerNotFound,
}

pub type Result<T> = std::result::Result<T, Error>;
