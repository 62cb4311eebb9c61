//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

mod schema_desktop;
mod schema_services;

pub use schema_desktop::*;
pub use schema_services::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub replay: ReplayConfig,

    #[serde(default)]
    pub confirmation: ConfirmationConfig,
}

/// Host application identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Windows with exactly this name are excluded from the inventory.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Return focus to the host after each capture.
    #[serde(default = "default_true")]
    pub refocus_after_capture: bool,

    /// Host window title to fall back on when the previously focused
    /// window is unknown. Defaults to `app_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refocus_title: Option<String>,
}

impl HostConfig {
    /// Title re-activated after capture, or `None` when refocusing is off.
    pub fn refocus_target(&self) -> Option<&str> {
        if !self.refocus_after_capture {
            return None;
        }
        Some(self.refocus_title.as_deref().unwrap_or(&self.app_name))
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            refocus_after_capture: true,
            refocus_title: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_app_name() -> String {
    "formbridge".to_string()
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
