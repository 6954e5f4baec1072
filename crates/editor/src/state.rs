//! Application state

use crate::Notification;
use edit_engine::{EditorSession, SessionConfig, TextMetrics};
use store::{EditorPrefs, TemplateApi};
use template_model::{Margins, TemplateKind, TemplateMeta, Zoom};

/// Build session tunables from editor preferences
pub fn session_config(prefs: &EditorPrefs) -> SessionConfig {
    SessionConfig {
        history_limit: prefs.history_limit,
        metrics: TextMetrics {
            line_height_px: prefs.line_height_px,
            avg_char_width_px: prefs.avg_char_width_px,
        },
        default_margins: Margins::uniform(prefs.default_margin_cm),
        zoom: Zoom::from_percent(prefs.default_zoom),
    }
}

/// Outcome of opening a PDF import from session storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The import was loaded into a new unsaved template
    Opened,
    /// The import data was unusable; the host should return to the list
    RedirectToList,
}

/// One open template: its editing session, its metadata, and the backend it
/// is saved to.
pub struct EditorApp<A: TemplateApi> {
    pub(crate) api: A,
    pub(crate) session: EditorSession,
    pub(crate) meta: TemplateMeta,
    pub(crate) config: SessionConfig,
    pub(crate) notifications: Vec<Notification>,
}

impl<A: TemplateApi> EditorApp<A> {
    /// Start with a new, unsaved custom template
    pub fn new(api: A, config: SessionConfig) -> Self {
        Self {
            api,
            session: EditorSession::new(config.clone()),
            meta: TemplateMeta::unsaved(TemplateKind::Custom),
            config,
            notifications: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    pub fn meta(&self) -> &TemplateMeta {
        &self.meta
    }

    /// Id of the stored template, if it has been saved or opened
    pub fn template_id(&self) -> Option<&str> {
        self.meta.id.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.meta.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.meta.description = description.into();
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Remove and return pending notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!(message = %notification.message, "Error notification");
        }
        self.notifications.push(notification);
    }
}
