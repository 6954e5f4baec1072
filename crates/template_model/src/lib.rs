//! Template Model - Positioned elements, pages, and page geometry
//!
//! This crate provides the data model edited by the contract template editor:
//! typed visual elements placed on fixed-size A4 pages, per-page margins and
//! free text, and the zoom/viewport math that maps screen coordinates to
//! document coordinates.

mod element;
mod error;
mod geometry;
mod ids;
mod page;
mod template;
mod zoom;

pub use element::*;
pub use error::*;
pub use geometry::*;
pub use ids::*;
pub use page::*;
pub use template::*;
pub use zoom::*;
