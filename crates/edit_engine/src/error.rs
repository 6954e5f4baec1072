//! Error types for editing operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Page not found: {page} (document has {page_count} pages)")]
    PageNotFound { page: u32, page_count: usize },

    #[error("Unsupported drop: {0}")]
    UnsupportedDrop(String),

    #[error("Template model error: {0}")]
    Model(#[from] template_model::ModelError),
}

pub type Result<T> = std::result::Result<T, EditError>;
