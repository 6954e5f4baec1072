//! Editor settings management
//!
//! Settings live in a `settings.json` file in the app data directory,
//! written by hand or by deployment tooling. A missing or unparsable file
//! yields defaults rather than an error.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    /// Template API connection
    pub api: ApiSettings,
    /// Canvas and editing defaults
    pub editor: EditorPrefs,
    /// Log output
    pub logging: LoggingSettings,
}

/// Template API connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the application serving `/api/contracts/templates`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Canvas and editing defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorPrefs {
    /// Zoom percentage a new session starts at
    pub default_zoom: u16,
    /// Maximum undo snapshots kept; unlimited when absent
    pub history_limit: Option<usize>,
    /// Line height used to estimate text overflow
    pub line_height_px: f64,
    /// Average glyph width used to estimate text overflow
    pub avg_char_width_px: f64,
    /// Margin applied to new pages, in centimeters
    pub default_margin_cm: f64,
}

impl Default for EditorPrefs {
    fn default() -> Self {
        Self {
            default_zoom: 100,
            history_limit: None,
            line_height_px: 20.0,
            avg_char_width_px: 7.5,
            default_margin_cm: 2.54,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `edit_engine=debug,info`
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Reads editor settings from the app data directory
pub struct SettingsManager {
    settings_path: PathBuf,
    current: EditorSettings,
}

impl SettingsManager {
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self {
            settings_path: app_data_dir.join("settings.json"),
            current: EditorSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk. A missing file gives defaults; so does an
    /// unparsable one, with a warning.
    pub async fn load(&mut self) -> Result<&EditorSettings> {
        self.current = match tokio::fs::read_to_string(&self.settings_path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %self.settings_path.display(),
                    "Failed to parse settings file, using defaults: {}",
                    e
                );
                EditorSettings::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => EditorSettings::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(&self.current)
    }

    pub fn get(&self) -> &EditorSettings {
        &self.current
    }
}
