//! Store - Template persistence
//!
//! This crate handles the stored form of templates, the `TemplateApi`
//! backends (HTTP and in-memory), PDF imports handed over through session
//! storage, and editor settings.

mod api;
mod error;
mod format;
mod http;
mod import;
mod memory;
mod serializer;
mod settings;

pub use api::*;
pub use error::*;
pub use format::*;
pub use http::*;
pub use import::*;
pub use memory::*;
pub use serializer::*;
pub use settings::*;
