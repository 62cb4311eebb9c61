//! External process configuration (extraction, confirmation overlay).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Extraction subprocess configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Program to launch.
    #[serde(default = "default_program")]
    pub program: String,

    /// Leading arguments; the JSON context is appended after these.
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Working directory for the subprocess.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Unset or `0` waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ExtractionConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: None,
            timeout_secs: None,
        }
    }
}

fn default_program() -> String {
    "python3".to_string()
}

fn default_args() -> Vec<String> {
    vec!["ingest.py".to_string()]
}

/// Confirmation overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationConfig {
    /// Overlay program; required when `replay.confirm_fields` is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_program: Option<String>,

    #[serde(default)]
    pub overlay_args: Vec<String>,

    /// Unanswered prompts are auto-rejected after this many seconds.
    /// `0` waits indefinitely.
    #[serde(default = "default_confirm_timeout")]
    pub timeout_secs: Option<u64>,

    /// Time the overlay gets to exit after its stdin closes before it is killed.
    #[serde(default = "default_close_grace")]
    pub close_grace_ms: u64,
}

impl ConfirmationConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }

    pub fn close_grace(&self) -> Duration {
        Duration::from_millis(self.close_grace_ms)
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            overlay_program: None,
            overlay_args: Vec::new(),
            timeout_secs: default_confirm_timeout(),
            close_grace_ms: default_close_grace(),
        }
    }
}

fn default_confirm_timeout() -> Option<u64> {
    Some(60)
}

fn default_close_grace() -> u64 {
    2000
}
