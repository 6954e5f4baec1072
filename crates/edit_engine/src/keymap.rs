//! Keyboard shortcuts for the template editor

use serde::{Deserialize, Serialize};

/// Editor action bound to a shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Save,
}

impl ShortcutAction {
    /// Whether the host should suppress the platform's default handling.
    /// True for every bound shortcut; ctrl/cmd+S would otherwise open the
    /// browser's save dialog.
    pub fn prevents_default(&self) -> bool {
        true
    }
}

/// A key press with its modifier state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    /// Key value as reported by the host (`"z"`, `"Z"`, `"Enter"`, ...)
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    /// Command key on macOS
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Map the chord to an editor action.
    ///
    /// Ctrl and Cmd are interchangeable. Undo is Z; redo is Y or Shift+Z;
    /// save is S.
    pub fn action(&self) -> Option<ShortcutAction> {
        if !(self.ctrl || self.meta) {
            return None;
        }
        match self.key.to_ascii_lowercase().as_str() {
            "z" if self.shift => Some(ShortcutAction::Redo),
            "z" => Some(ShortcutAction::Undo),
            "y" => Some(ShortcutAction::Redo),
            "s" => Some(ShortcutAction::Save),
            _ => None,
        }
    }
}
