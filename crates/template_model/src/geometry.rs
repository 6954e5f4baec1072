//! Page geometry in logical document units
//!
//! The page canvas is a fixed A4 sheet at 96 DPI. Every stored coordinate is
//! in these unscaled units; zoom only affects on-screen rendering.

use serde::{Deserialize, Serialize};

/// Page canvas width (A4 at 96 DPI)
pub const PAGE_WIDTH: f64 = 794.0;

/// Page canvas height (A4 at 96 DPI)
pub const PAGE_HEIGHT: f64 = 1123.0;

/// Pixels per centimetre at 96 DPI
pub const PX_PER_CM: f64 = 37.8;

/// A point in document or screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`
    pub fn offset_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Size of the page canvas
pub const fn page_size() -> Size {
    Size::new(PAGE_WIDTH, PAGE_HEIGHT)
}

/// Convert centimetres to logical pixels
pub fn cm_to_px(cm: f64) -> f64 {
    cm * PX_PER_CM
}

/// Convert logical pixels to centimetres
pub fn px_to_cm(px: f64) -> f64 {
    px / PX_PER_CM
}

/// Clamp an element origin so a box of `size` stays fully on the page.
///
/// A box larger than the page pins to the top/left edge.
pub fn clamp_to_page(origin: Point, size: Size) -> Point {
    let max_x = (PAGE_WIDTH - size.width).max(0.0);
    let max_y = (PAGE_HEIGHT - size.height).max(0.0);
    Point::new(origin.x.clamp(0.0, max_x), origin.y.clamp(0.0, max_y))
}
