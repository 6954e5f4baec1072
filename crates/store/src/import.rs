//! PDF import handed over through browser session storage
//!
//! The upload page stores a JSON blob under [`UPLOADED_PDF_KEY`] and sends the
//! user to the editor, which turns it into a new PDF template.

use crate::{Result, StoreError};
use serde::{Deserialize, Serialize};
use template_model::{
    Element, ElementKind, Page, Point, TemplateDocument, TemplateKind, TemplateMeta, MAX_PAGES,
    PAGE_HEIGHT, PAGE_WIDTH,
};

/// Session storage key holding a pending PDF import
pub const UPLOADED_PDF_KEY: &str = "uploadedPDF";

/// A pending PDF import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfImport {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    /// `data:application/pdf;base64,...` or a rendered first page
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default)]
    pub page_count: Option<u32>,
}

impl PdfImport {
    /// Parse the session blob
    pub fn from_session_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::SessionImport(e.to_string()))
    }

    /// Metadata for the new template
    pub fn meta(&self) -> TemplateMeta {
        TemplateMeta::unsaved(TemplateKind::Pdf)
            .with_name(self.name.clone())
            .with_description(self.description.clone().unwrap_or_default())
    }

    /// Build the starting document: one blank page per PDF page, with the
    /// file shown as a full-page image on the first page.
    pub fn into_document(self) -> (TemplateMeta, TemplateDocument) {
        let meta = self.meta();
        let page_count = (self.page_count.unwrap_or(1) as usize).clamp(1, MAX_PAGES);

        let mut document = TemplateDocument {
            elements: Vec::new(),
            pages: (0..page_count).map(|_| Page::blank()).collect(),
        };

        if let Some(url) = self.data_url.filter(|url| !url.is_empty()) {
            let mut background =
                Element::new(ElementKind::Image, Point::new(0.0, 0.0), 1).with_image_url(url);
            background.width = PAGE_WIDTH;
            background.height = PAGE_HEIGHT;
            document.elements.push(background);
        }

        tracing::info!(
            name = %meta.name,
            pages = page_count,
            "Prepared PDF import"
        );
        (meta, document)
    }
}
