//! Edit Engine - Element store, undo/redo, pages, and pointer interaction
//!
//! This crate implements the editing state of the template editor. The
//! [`EditorSession`] owns everything and is the entry point for hosts;
//! the individual pieces are exposed for hosts that need finer control.

mod drop_target;
mod element_store;
mod error;
mod executor;
mod history;
mod interaction;
mod keymap;
mod pages;

pub use drop_target::*;
pub use element_store::*;
pub use error::*;
pub use executor::*;
pub use history::*;
pub use interaction::*;
pub use keymap::*;
pub use pages::*;
