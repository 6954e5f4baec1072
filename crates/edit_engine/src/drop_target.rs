//! Canvas drop targets: desktop image files and palette items

use crate::{EditError, Result};
use base64::Engine;
use template_model::ElementKind;

/// Something dropped onto the page canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DropPayload {
    /// A file dragged in from the desktop
    File {
        /// MIME type reported for the file
        mime: String,
        bytes: Vec<u8>,
    },
    /// An element type dragged from the tool palette
    Palette(ElementKind),
}

impl DropPayload {
    pub fn file(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::File {
            mime: mime.into(),
            bytes,
        }
    }
}

/// Whether a MIME type names an image format
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Encode file bytes as an embeddable `data:` URL.
///
/// Only image types are accepted.
pub fn image_data_url(mime: &str, bytes: &[u8]) -> Result<String> {
    if !is_image_mime(mime) {
        return Err(EditError::UnsupportedDrop(format!(
            "expected an image file, got {}",
            mime
        )));
    }
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime.trim(), encoded))
}
