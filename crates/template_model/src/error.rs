//! Error types for template model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Page not found: {page} (document has {page_count} pages)")]
    PageNotFound { page: u32, page_count: usize },

    #[error("Invalid zoom level: {0}%")]
    InvalidZoom(u16),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
