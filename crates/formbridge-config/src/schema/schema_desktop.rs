//! Desktop-facing configuration (capture resolution, replay pacing).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Canonical capture resolution.
///
/// Captures are scaled to fit this size regardless of the window's
/// on-screen size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_capture_width")]
    pub width: u32,

    #[serde(default = "default_capture_height")]
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: default_capture_width(),
            height: default_capture_height(),
        }
    }
}

fn default_capture_width() -> u32 {
    1920
}

fn default_capture_height() -> u32 {
    1080
}

/// Settle delays between synthetic input events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Pause after activating the target window.
    #[serde(default = "default_activation_settle")]
    pub activation_settle_ms: u64,

    /// Pause after moving the pointer.
    #[serde(default = "default_move_settle")]
    pub move_settle_ms: u64,

    /// Pause after clicking (click-to-focus latency).
    #[serde(default = "default_click_settle")]
    pub click_settle_ms: u64,

    /// Pause before the next field.
    #[serde(default = "default_field_delay")]
    pub field_delay_ms: u64,

    /// Ask for confirmation before typing each field.
    #[serde(default)]
    pub confirm_fields: bool,

    /// Re-activate whichever window was in front once a replay finishes.
    #[serde(default = "super::default_true")]
    pub restore_focus: bool,
}

impl ReplayConfig {
    pub fn activation_settle(&self) -> Duration {
        Duration::from_millis(self.activation_settle_ms)
    }

    pub fn move_settle(&self) -> Duration {
        Duration::from_millis(self.move_settle_ms)
    }

    pub fn click_settle(&self) -> Duration {
        Duration::from_millis(self.click_settle_ms)
    }

    pub fn field_delay(&self) -> Duration {
        Duration::from_millis(self.field_delay_ms)
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            activation_settle_ms: default_activation_settle(),
            move_settle_ms: default_move_settle(),
            click_settle_ms: default_click_settle(),
            field_delay_ms: default_field_delay(),
            confirm_fields: false,
            restore_focus: true,
        }
    }
}

fn default_activation_settle() -> u64 {
    500
}

fn default_move_settle() -> u64 {
    10
}

fn default_click_settle() -> u64 {
    10
}

fn default_field_delay() -> u64 {
    20
}
