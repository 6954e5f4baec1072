//! Page Model - Margins and per-page free text
//!
//! Pages are addressed by 1-based position. Each page owns its free-text
//! content and its own margin settings; elements refer to pages by position.

use crate::{cm_to_px, PageId, Size, PAGE_HEIGHT, PAGE_WIDTH};
use serde::{Deserialize, Serialize};

/// Smallest allowed margin in centimetres
pub const MIN_MARGIN_CM: f64 = 0.0;

/// Largest allowed margin in centimetres
pub const MAX_MARGIN_CM: f64 = 10.0;

/// Margin used for new pages (one inch)
pub const DEFAULT_MARGIN_CM: f64 = 2.54;

/// Most pages created from stored or imported data. Elements that point
/// past it are kept but stay hidden.
pub const MAX_PAGES: usize = 1000;

/// One edge of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Page margins in centimetres. Values read from storage are clamped like
/// any other update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredMargins")]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMargins {
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
}

impl From<StoredMargins> for Margins {
    fn from(stored: StoredMargins) -> Self {
        Self {
            top: clamp_margin(stored.top),
            bottom: clamp_margin(stored.bottom),
            left: clamp_margin(stored.left),
            right: clamp_margin(stored.right),
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN_CM)
    }
}

impl Margins {
    /// Same margin on every side, clamped to the allowed range
    pub fn uniform(cm: f64) -> Self {
        let cm = clamp_margin(cm);
        Self {
            top: cm,
            bottom: cm,
            left: cm,
            right: cm,
        }
    }

    pub fn get(&self, side: MarginSide) -> f64 {
        match side {
            MarginSide::Top => self.top,
            MarginSide::Bottom => self.bottom,
            MarginSide::Left => self.left,
            MarginSide::Right => self.right,
        }
    }

    /// Set one side, clamping to `[0, 10]` cm. Returns the stored value.
    pub fn set(&mut self, side: MarginSide, cm: f64) -> f64 {
        let cm = clamp_margin(cm);
        match side {
            MarginSide::Top => self.top = cm,
            MarginSide::Bottom => self.bottom = cm,
            MarginSide::Left => self.left = cm,
            MarginSide::Right => self.right = cm,
        }
        cm
    }

    /// Text-area inset for one side in logical pixels
    pub fn inset_px(&self, side: MarginSide) -> f64 {
        cm_to_px(self.get(side))
    }

    /// Size of the text area left inside the margins, never negative
    pub fn content_area(&self) -> Size {
        let width = PAGE_WIDTH - self.inset_px(MarginSide::Left) - self.inset_px(MarginSide::Right);
        let height = PAGE_HEIGHT - self.inset_px(MarginSide::Top) - self.inset_px(MarginSide::Bottom);
        Size::new(width.max(0.0), height.max(0.0))
    }
}

fn clamp_margin(cm: f64) -> f64 {
    if cm.is_nan() {
        return MIN_MARGIN_CM;
    }
    cm.clamp(MIN_MARGIN_CM, MAX_MARGIN_CM)
}

/// One page of a multi-page template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub id: PageId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub margins: Margins,
}

impl Page {
    /// Create a blank page with default margins
    pub fn blank() -> Self {
        Self::with_margins(Margins::default())
    }

    /// Create a blank page with the given margins
    pub fn with_margins(margins: Margins) -> Self {
        Self {
            id: PageId::new(),
            content: String::new(),
            margins,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::blank()
    }
}
