//! Element Model - Positioned, typed visual objects on a template page

use crate::{ElementId, Point, Size};
use serde::{Deserialize, Serialize};

// =============================================================================
// Element Kind
// =============================================================================

/// The kind of visual object an element draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Editable text block
    Text,
    /// Outlined rectangle
    Rectangle,
    /// Signature box
    Signature,
    /// Embedded image
    Image,
    /// Tick box
    Checkbox,
}

impl ElementKind {
    /// All element kinds, in palette order
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Text,
        ElementKind::Rectangle,
        ElementKind::Signature,
        ElementKind::Image,
        ElementKind::Checkbox,
    ];

    /// Size given to a freshly created element of this kind
    pub fn default_size(&self) -> Size {
        match self {
            ElementKind::Text => Size::new(300.0, 40.0),
            ElementKind::Image => Size::new(200.0, 150.0),
            ElementKind::Checkbox => Size::new(20.0, 20.0),
            ElementKind::Rectangle | ElementKind::Signature => Size::new(150.0, 80.0),
        }
    }

    /// Get the kind name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Text => "Text",
            ElementKind::Rectangle => "Rectangle",
            ElementKind::Signature => "Signature",
            ElementKind::Image => "Image",
            ElementKind::Checkbox => "Checkbox",
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// A positioned visual object placed on one page of a template.
///
/// Coordinates are in unscaled document units relative to the page's
/// top-left corner. `page` is the 1-based position of the owning page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl Element {
    /// Create an element of `kind` at `origin` with the kind's default size
    pub fn new(kind: ElementKind, origin: Point, page: u32) -> Self {
        let size = kind.default_size();
        Self {
            id: ElementId::new(),
            kind,
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
            content: None,
            image_url: None,
            checked: None,
            page,
        }
    }

    /// Set the image source
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the text content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether `point` (document coordinates) lies inside this element
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// A partial update to an element. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub checked: Option<bool>,
    pub page: Option<u32>,
}

impl ElementPatch {
    /// Patch that moves an element
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Patch that resizes an element
    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// Patch that replaces the text content
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Patch that sets the checkbox state
    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Default::default()
        }
    }

    /// Patch that moves an element to another page
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply this patch to an element in place
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(x) = self.x {
            element.x = x;
        }
        if let Some(y) = self.y {
            element.y = y;
        }
        if let Some(width) = self.width {
            element.width = width;
        }
        if let Some(height) = self.height {
            element.height = height;
        }
        if let Some(ref content) = self.content {
            element.content = Some(content.clone());
        }
        if let Some(ref url) = self.image_url {
            element.image_url = Some(url.clone());
        }
        if let Some(checked) = self.checked {
            element.checked = Some(checked);
        }
        if let Some(page) = self.page {
            element.page = page;
        }
    }
}
