//! Zoom and viewport mapping between screen and document coordinates

use crate::{ModelError, Point, Result};
use serde::{Deserialize, Serialize};

/// Smallest zoom percentage
pub const MIN_ZOOM: u16 = 25;
/// Largest zoom percentage
pub const MAX_ZOOM: u16 = 200;
/// Zoom increment
pub const ZOOM_STEP: u16 = 25;

/// On-screen scale of the page canvas, as a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zoom(u16);

impl Zoom {
    /// Build a zoom level, snapping to the nearest step within range
    pub fn from_percent(percent: u16) -> Self {
        let clamped = percent.clamp(MIN_ZOOM, MAX_ZOOM);
        let snapped = ((clamped + ZOOM_STEP / 2) / ZOOM_STEP) * ZOOM_STEP;
        Self(snapped.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    /// Build a zoom level, rejecting values that are off-range or off-step
    pub fn try_from_percent(percent: u16) -> Result<Self> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&percent) || percent % ZOOM_STEP != 0 {
            return Err(ModelError::InvalidZoom(percent));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> u16 {
        self.0
    }

    /// Multiplier from document units to screen pixels
    pub fn scale(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Next step up, saturating at the maximum
    pub fn zoom_in(&self) -> Self {
        Self((self.0 + ZOOM_STEP).min(MAX_ZOOM))
    }

    /// Next step down, saturating at the minimum
    pub fn zoom_out(&self) -> Self {
        Self(self.0.saturating_sub(ZOOM_STEP).max(MIN_ZOOM))
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(100)
    }
}

/// Where the page canvas sits on screen and how it is scaled
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen position of the canvas's top-left corner
    pub origin: Point,
    pub zoom: Zoom,
}

impl Viewport {
    pub fn new(origin: Point, zoom: Zoom) -> Self {
        Self { origin, zoom }
    }

    /// Map a screen point into unscaled document coordinates
    pub fn to_document(&self, screen: Point) -> Point {
        let scale = self.zoom.scale();
        Point::new(
            (screen.x - self.origin.x) / scale,
            (screen.y - self.origin.y) / scale,
        )
    }

    /// Map a document point onto the screen
    pub fn to_screen(&self, doc: Point) -> Point {
        let scale = self.zoom.scale();
        Point::new(doc.x * scale + self.origin.x, doc.y * scale + self.origin.y)
    }

    /// Convert a screen-space distance into document units
    pub fn to_document_distance(&self, screen_distance: f64) -> f64 {
        screen_distance / self.zoom.scale()
    }
}
