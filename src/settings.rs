use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_api_base_url() -> String {
    "http://localhost:5000/api/v1".into()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Base URL of the remote REST API, including the version prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds for the HTTP client.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Delay before a typed search term is committed to the query.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Rows per page used when a list page is first opened.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            enable_toasts: default_toasts(),
            toast_duration: default_toast_duration(),
            search_debounce_ms: default_search_debounce_ms(),
            default_page_size: default_page_size(),
            debug_logging: false,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Root directory for settings, session marker and logs.
pub fn config_root() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eventdeck")
}

pub fn settings_path(root: &Path) -> PathBuf {
    root.join("settings.json")
}

pub fn session_path(root: &Path) -> PathBuf {
    root.join("session.json")
}

pub fn log_dir(root: &Path) -> PathBuf {
    root.join("logs")
}
