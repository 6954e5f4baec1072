//! In-process template storage
//!
//! Useful for tests and for running the editor without a backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::{
    CreatedTemplate, NewTemplate, Result, StoreError, TemplateApi, TemplateRecord, TemplateUpdate,
    TemplateUpload,
};
use chrono::Utc;
use template_model::TemplateKind;

/// [`TemplateApi`] backed by a map in memory
#[derive(Debug, Default)]
pub struct MemoryTemplateApi {
    templates: RwLock<HashMap<String, TemplateRecord>>,
    next_id: AtomicU64,
}

impl MemoryTemplateApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record as-is, replacing any record with the same id
    pub fn insert(&self, record: TemplateRecord) {
        let mut templates = self.templates.write().unwrap_or_else(|e| e.into_inner());
        templates.insert(record.id.clone(), record);
    }

    /// Get a copy of a stored record
    pub fn get(&self, id: &str) -> Option<TemplateRecord> {
        let templates = self.templates.read().unwrap_or_else(|e| e.into_inner());
        templates.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allocate_id(&self) -> String {
        (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

impl TemplateApi for MemoryTemplateApi {
    async fn create_template(&self, template: &NewTemplate) -> Result<CreatedTemplate> {
        let id = self.allocate_id();
        let now = Utc::now();
        self.insert(TemplateRecord {
            id: id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            kind: template.kind,
            elements: serde_json::Value::String(template.elements.clone()),
            created_at: Some(now),
            updated_at: Some(now),
        });
        tracing::debug!(id = %id, "Created template in memory");
        Ok(CreatedTemplate { id })
    }

    async fn update_template(&self, id: &str, update: &TemplateUpdate) -> Result<()> {
        let mut templates = self.templates.write().unwrap_or_else(|e| e.into_inner());
        let record = templates
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        record.name = update.name.clone();
        record.description = update.description.clone();
        record.elements = serde_json::Value::String(update.elements.clone());
        record.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn fetch_template(&self, id: &str) -> Result<TemplateRecord> {
        self.get(id).ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete_template(&self, id: &str) -> Result<()> {
        let mut templates = self.templates.write().unwrap_or_else(|e| e.into_inner());
        templates
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn upload_template(&self, upload: TemplateUpload) -> Result<CreatedTemplate> {
        let id = self.allocate_id();
        let now = Utc::now();
        tracing::debug!(id = %id, file = %upload.file_name, bytes = upload.bytes.len(), "Stored upload in memory");
        self.insert(TemplateRecord {
            id: id.clone(),
            name: upload.name,
            description: upload.description,
            kind: TemplateKind::Pdf,
            elements: serde_json::Value::String("[]".to_string()),
            created_at: Some(now),
            updated_at: Some(now),
        });
        Ok(CreatedTemplate { id })
    }
}
