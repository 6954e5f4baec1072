//! HTTP client for the template endpoints.
//!
//! Wraps `/api/contracts/templates` (create, fetch, update, delete, upload)
//! using [`reqwest`].

use std::time::Duration;

use crate::{
    ApiSettings, CreatedTemplate, NewTemplate, Result, StoreError, TemplateApi, TemplateRecord,
    TemplateUpdate, TemplateUpload,
};
use reqwest::multipart;

/// Path of the template collection, relative to the API base URL
pub const TEMPLATES_PATH: &str = "/api/contracts/templates";

/// HTTP client for the application's template API.
#[derive(Debug, Clone)]
pub struct HttpTemplateApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTemplateApi {
    /// Create a client from API settings.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &settings.base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, TEMPLATES_PATH)
    }

    fn template_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, TEMPLATES_PATH, id)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. A 404 becomes
    /// [`StoreError::NotFound`]; other failures carry the status and body.
    async fn ensure_success(response: reqwest::Response, id: Option<&str>) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::NotFound(id.to_string()));
            }
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        Err(StoreError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        id: Option<&str>,
    ) -> Result<T> {
        let response = Self::ensure_success(response, id).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl TemplateApi for HttpTemplateApi {
    async fn create_template(&self, template: &NewTemplate) -> Result<CreatedTemplate> {
        tracing::debug!(name = %template.name, "POST template");
        let response = self
            .client
            .post(self.collection_url())
            .json(template)
            .send()
            .await?;
        Self::parse_response(response, None).await
    }

    async fn update_template(&self, id: &str, update: &TemplateUpdate) -> Result<()> {
        tracing::debug!(id, "PUT template");
        let response = self
            .client
            .put(self.template_url(id))
            .json(update)
            .send()
            .await?;
        Self::ensure_success(response, Some(id)).await?;
        Ok(())
    }

    async fn fetch_template(&self, id: &str) -> Result<TemplateRecord> {
        tracing::debug!(id, "GET template");
        let response = self.client.get(self.template_url(id)).send().await?;
        Self::parse_response(response, Some(id)).await
    }

    async fn delete_template(&self, id: &str) -> Result<()> {
        tracing::debug!(id, "DELETE template");
        let response = self.client.delete(self.template_url(id)).send().await?;
        Self::ensure_success(response, Some(id)).await?;
        Ok(())
    }

    async fn upload_template(&self, upload: TemplateUpload) -> Result<CreatedTemplate> {
        tracing::debug!(file = %upload.file_name, "POST template upload");
        let file = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.mime)?;
        let form = multipart::Form::new()
            .part("file", file)
            .text("name", upload.name)
            .text("description", upload.description);

        let response = self
            .client
            .post(format!("{}/upload", self.collection_url()))
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(response, None).await
    }
}
