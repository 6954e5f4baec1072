//! Template Editor - application state for the template canvas
//!
//! [`EditorApp`] pairs an [`edit_engine::EditorSession`] with the
//! [`store::TemplateApi`] backend it saves to, and collects notifications
//! for the host to display.

mod commands;
mod error;
mod logging;
mod notifications;
mod state;

pub use error::*;
pub use logging::*;
pub use notifications::*;
pub use state::*;
