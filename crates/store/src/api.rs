//! Template CRUD interface and its request/response types
//!
//! The editor talks to template storage only through [`TemplateApi`].
//! [`crate::HttpTemplateApi`] speaks to the application's
//! `/api/contracts/templates` endpoints; [`crate::MemoryTemplateApi`] keeps
//! everything in process.

use crate::{decode_document, encode_document, DecodedDocument, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use template_model::{TemplateDocument, TemplateKind, TemplateMeta};

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    /// Encoded document (see [`crate::encode_document`])
    pub elements: String,
}

impl NewTemplate {
    /// Build a create request; blank names become "Untitled Template"
    pub fn from_document(meta: &TemplateMeta, document: &TemplateDocument) -> Result<Self> {
        Ok(Self {
            name: meta.effective_name().to_string(),
            description: meta.description.clone(),
            kind: meta.kind,
            elements: encode_document(document)?,
        })
    }
}

/// Body of an update request. Updates overwrite the whole template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUpdate {
    pub name: String,
    pub description: String,
    pub elements: String,
}

impl TemplateUpdate {
    pub fn from_document(meta: &TemplateMeta, document: &TemplateDocument) -> Result<Self> {
        Ok(Self {
            name: meta.effective_name().to_string(),
            description: meta.description.clone(),
            elements: encode_document(document)?,
        })
    }
}

/// Response to a create or upload request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedTemplate {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
}

/// A stored template as returned by a fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: TemplateKind,
    /// Usually a JSON string; older servers may inline the array
    #[serde(default)]
    pub elements: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TemplateRecord {
    pub fn meta(&self) -> TemplateMeta {
        TemplateMeta {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind,
        }
    }

    /// Decode the stored document
    pub fn document(&self) -> Result<DecodedDocument> {
        decode_document(&self.elements)
    }
}

/// A PDF (or other file) uploaded to become a template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub name: String,
    pub description: String,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Template storage used by the editor.
///
/// Calls are independent: nothing is retried, cancelled, or ordered, so two
/// quick saves may land in either order and the later arrival wins.
#[allow(async_fn_in_trait)]
pub trait TemplateApi {
    /// Store a new template and return its id
    async fn create_template(&self, template: &NewTemplate) -> Result<CreatedTemplate>;

    /// Overwrite an existing template
    async fn update_template(&self, id: &str, update: &TemplateUpdate) -> Result<()>;

    /// Fetch a template by id
    async fn fetch_template(&self, id: &str) -> Result<TemplateRecord>;

    /// Delete a template by id
    async fn delete_template(&self, id: &str) -> Result<()>;

    /// Upload a file as a new template
    async fn upload_template(&self, upload: TemplateUpload) -> Result<CreatedTemplate>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_template_defaults_name() {
        let meta = TemplateMeta::unsaved(TemplateKind::Custom);
        let request = NewTemplate::from_document(&meta, &TemplateDocument::blank()).unwrap();

        assert_eq!(request.name, "Untitled Template");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["type"], "CUSTOM");
        assert!(body["elements"].is_string());
    }

    #[test]
    fn test_record_accepts_numeric_id_and_timestamps() {
        let record: TemplateRecord = serde_json::from_value(json!({
            "id": 42,
            "name": "Service Agreement",
            "type": "PDF",
            "elements": "[]",
            "createdAt": "2024-03-01T09:30:00Z",
            "ownerId": "u-1"
        }))
        .unwrap();

        assert_eq!(record.id, "42");
        assert_eq!(record.kind, TemplateKind::Pdf);
        assert!(record.created_at.is_some());
        assert_eq!(record.meta().id.as_deref(), Some("42"));
        assert!(record.document().unwrap().document.elements.is_empty());
    }

    #[test]
    fn test_created_template_ignores_extra_fields() {
        let created: CreatedTemplate =
            serde_json::from_value(json!({"id": "clx9", "name": "x", "elements": "[]"})).unwrap();
        assert_eq!(created.id, "clx9");
    }
}
