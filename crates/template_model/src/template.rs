//! Template metadata and the editable document it wraps

use crate::{Element, Page};
use serde::{Deserialize, Serialize};

/// Name used when a template is saved without one
pub const DEFAULT_TEMPLATE_NAME: &str = "Untitled Template";

/// How a template was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemplateKind {
    /// Built on top of an uploaded PDF
    #[serde(rename = "PDF")]
    Pdf,
    /// Built from scratch in the editor
    #[default]
    #[serde(rename = "CUSTOM")]
    Custom,
}

/// Descriptive fields of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMeta {
    /// Server-issued id; `None` until the first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: TemplateKind,
}

impl TemplateMeta {
    /// Metadata for a template that has not been saved yet
    pub fn unsaved(kind: TemplateKind) -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            kind,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Name to persist: blank names fall back to [`DEFAULT_TEMPLATE_NAME`]
    pub fn effective_name(&self) -> &str {
        if self.name.trim().is_empty() {
            DEFAULT_TEMPLATE_NAME
        } else {
            &self.name
        }
    }
}

/// Everything the editor persists for one template: elements plus pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    pub elements: Vec<Element>,
    pub pages: Vec<Page>,
}

impl TemplateDocument {
    /// A document with one blank page and no elements
    pub fn blank() -> Self {
        Self {
            elements: Vec::new(),
            pages: vec![Page::blank()],
        }
    }

    /// Highest page number referenced by any element
    pub fn max_element_page(&self) -> u32 {
        self.elements.iter().map(|e| e.page).max().unwrap_or(1)
    }
}

impl Default for TemplateDocument {
    fn default() -> Self {
        Self::blank()
    }
}
