//! Template lifecycle operations: new, open, import, save, delete
//!
//! Backend failures are reported twice: as the returned error and as an
//! error [`Notification`] carrying the raw message. Nothing is retried.

use crate::{AppError, EditorApp, ImportOutcome, Notification, Result};
use edit_engine::{EditorSession, KeyChord, ShortcutAction};
use store::{NewTemplate, PdfImport, TemplateApi, TemplateUpdate};
use template_model::{TemplateKind, TemplateMeta};

impl<A: TemplateApi> EditorApp<A> {
    /// Discard the open template and start a blank one
    pub fn new_template(&mut self, kind: TemplateKind) {
        self.session = EditorSession::new(self.config.clone());
        self.meta = TemplateMeta::unsaved(kind);
        tracing::info!(?kind, "Started new template");
    }

    /// Fetch a stored template and load it into the session
    pub async fn open(&mut self, id: &str) -> Result<()> {
        let loaded = match self.api.fetch_template(id).await {
            Ok(record) => record.document().map(|decoded| (record.meta(), decoded)),
            Err(e) => Err(e),
        };

        match loaded {
            Ok((meta, decoded)) => {
                if decoded.skipped_elements > 0 {
                    tracing::warn!(
                        id,
                        skipped = decoded.skipped_elements,
                        "Some template elements could not be read"
                    );
                }
                tracing::info!(
                    id,
                    elements = decoded.document.elements.len(),
                    pages = decoded.document.pages.len(),
                    schema_version = decoded.schema_version,
                    "Opened template"
                );
                self.session.load(decoded.document);
                self.meta = meta;
                Ok(())
            }
            Err(e) => {
                self.notify(Notification::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Start a PDF template from the session storage blob left by the
    /// upload page. Unusable data sends the user back to the list.
    pub fn open_import(&mut self, session_json: &str) -> ImportOutcome {
        let import = match PdfImport::from_session_json(session_json) {
            Ok(import) => import,
            Err(e) => {
                tracing::warn!("Discarding PDF import: {}", e);
                return ImportOutcome::RedirectToList;
            }
        };

        let (meta, document) = import.into_document();
        self.session.load(document);
        self.meta = meta;
        ImportOutcome::Opened
    }

    /// Save the live document. Creates the template on first save and
    /// overwrites it afterwards. Returns the template id.
    pub async fn save(&mut self) -> Result<String> {
        match self.persist().await {
            Ok(id) => {
                tracing::info!(
                    id = %id,
                    elements = self.session.elements().len(),
                    "Saved template"
                );
                self.meta.name = self.meta.effective_name().to_string();
                self.meta.id = Some(id.clone());
                self.notify(Notification::success("Template saved"));
                Ok(id)
            }
            Err(e) => {
                self.notify(Notification::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    async fn persist(&self) -> store::Result<String> {
        let document = self.session.document();
        match &self.meta.id {
            None => {
                let request = NewTemplate::from_document(&self.meta, &document)?;
                Ok(self.api.create_template(&request).await?.id)
            }
            Some(id) => {
                let update = TemplateUpdate::from_document(&self.meta, &document)?;
                self.api.update_template(id, &update).await?;
                Ok(id.clone())
            }
        }
    }

    /// Delete the stored template and start a blank one in its place
    pub async fn delete(&mut self) -> Result<()> {
        let id = self.meta.id.clone().ok_or(AppError::Unsaved)?;

        if let Err(e) = self.api.delete_template(&id).await {
            self.notify(Notification::error(e.to_string()));
            return Err(e.into());
        }

        tracing::info!(id = %id, "Deleted template");
        self.new_template(self.meta.kind);
        self.notify(Notification::success("Template deleted"));
        Ok(())
    }

    /// Handle a key press. Undo and redo act on the session; save persists.
    /// Returns the matched action so the host can suppress its default.
    pub async fn handle_key(&mut self, chord: &KeyChord) -> Option<ShortcutAction> {
        let action = self.session.handle_key(chord)?;
        tracing::debug!(?action, "Shortcut");

        if action == ShortcutAction::Save {
            // Failure is already surfaced as a notification
            let _ = self.save().await;
        }
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edit_engine::SessionConfig;
    use store::{MemoryTemplateApi, StoreError};
    use template_model::{ElementKind, Point};

    fn app() -> EditorApp<MemoryTemplateApi> {
        EditorApp::new(MemoryTemplateApi::new(), SessionConfig::default())
    }

    #[tokio::test]
    async fn test_first_save_creates_then_updates() {
        let mut app = app();
        app.session_mut()
            .add_element(ElementKind::Text, Point::new(10.0, 10.0), None);

        let id = app.save().await.unwrap();
        assert_eq!(app.template_id(), Some(id.as_str()));
        assert_eq!(app.meta().name, "Untitled Template");

        app.set_name("Lease");
        app.session_mut()
            .add_element(ElementKind::Checkbox, Point::new(40.0, 40.0), None);
        let second = app.save().await.unwrap();

        assert_eq!(second, id);
        assert_eq!(app.api().len(), 1);
        assert_eq!(app.api().get(&id).unwrap().name, "Lease");
    }

    #[tokio::test]
    async fn test_empty_template_saves() {
        let mut app = app();
        assert!(app.save().await.is_ok());
        assert_eq!(app.take_notifications(), vec![Notification::success("Template saved")]);
    }

    #[tokio::test]
    async fn test_open_missing_template_notifies() {
        let mut app = app();
        let result = app.open("404").await;

        assert!(matches!(
            result,
            Err(AppError::Store(StoreError::NotFound(_)))
        ));
        let notifications = app.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].is_error());
        assert!(notifications[0].message.contains("404"));
    }

    #[tokio::test]
    async fn test_ctrl_s_saves() {
        let mut app = app();
        let action = app.handle_key(&KeyChord::new("s").ctrl()).await;

        assert_eq!(action, Some(ShortcutAction::Save));
        assert!(app.template_id().is_some());
    }

    #[tokio::test]
    async fn test_undo_shortcut_goes_to_session() {
        let mut app = app();
        app.session_mut()
            .add_element(ElementKind::Rectangle, Point::new(0.0, 0.0), None);

        let action = app.handle_key(&KeyChord::new("z").meta()).await;
        assert_eq!(action, Some(ShortcutAction::Undo));
        assert!(app.session().elements().is_empty());
        assert!(app.api().is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_saved_template() {
        let mut app = app();
        assert!(matches!(app.delete().await, Err(AppError::Unsaved)));
    }

    #[tokio::test]
    async fn test_delete_resets_to_blank() {
        let mut app = app();
        app.session_mut()
            .add_element(ElementKind::Signature, Point::new(5.0, 5.0), None);
        app.save().await.unwrap();

        app.delete().await.unwrap();
        assert!(app.api().is_empty());
        assert!(app.template_id().is_none());
        assert!(app.session().elements().is_empty());
    }

    #[test]
    fn test_new_template_resets_session() {
        let mut app = app();
        app.session_mut()
            .add_element(ElementKind::Text, Point::new(0.0, 0.0), None);
        app.new_template(TemplateKind::Pdf);

        assert!(app.session().elements().is_empty());
        assert!(!app.session().can_undo());
        assert_eq!(app.meta().kind, TemplateKind::Pdf);
    }
}
