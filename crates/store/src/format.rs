//! Persisted shape of a template's `elements` field
//!
//! Templates written by this crate store a versioned envelope:
//!
//! ```json
//! { "schemaVersion": 1, "elements": [ ... ], "pages": [ ... ] }
//! ```
//!
//! Older templates store a bare element array with no version tag. Both
//! shapes are read; only the envelope is written.

use serde::{Deserialize, Serialize};
use template_model::Page;

/// Schema version written by this build
pub const SCHEMA_VERSION: u32 = 1;

/// Version assigned to unversioned (bare array) payloads
pub const LEGACY_SCHEMA_VERSION: u32 = 0;

/// Versioned container for a template's elements and pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEnvelope {
    pub schema_version: u32,
    /// Kept as raw values so one unreadable element does not sink the rest
    pub elements: Vec<serde_json::Value>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl DocumentEnvelope {
    pub fn is_supported(&self) -> bool {
        self.schema_version <= SCHEMA_VERSION
    }
}
