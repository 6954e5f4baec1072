//! Error types for the editor application

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] store::StoreError),

    #[error(transparent)]
    Edit(#[from] edit_engine::EditError),

    #[error("Template has not been saved yet")]
    Unsaved,
}

pub type Result<T> = std::result::Result<T, AppError>;
