//! Error types for template persistence

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Template API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Invalid template format: {0}")]
    InvalidFormat(String),

    #[error("Invalid imported PDF data: {0}")]
    SessionImport(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
