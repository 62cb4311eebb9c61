//! Overlay channel messages (one JSON object per line).

use serde::{Deserialize, Serialize};

use formbridge_protocols::{ConfirmChoice, ConfirmError};

/// Surface -> host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SurfaceEvent {
    /// The surface is rendering and can receive a prompt.
    OverlayReady,
    FieldConfirmResponse { choice: ConfirmChoice },
}

impl SurfaceEvent {
    pub fn parse_line(line: &str) -> Result<Self, ConfirmError> {
        serde_json::from_str(line.trim())
            .map_err(|e| ConfirmError::Protocol(format!("bad overlay message {:?}: {}", line, e)))
    }
}

/// Host -> surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostCommand {
    /// Coordinates are relative to the overlay's top-left corner.
    ShowFieldConfirm { x: i32, y: i32, text: String },
}

impl HostCommand {
    /// Serialise as a newline-terminated JSON line.
    pub fn to_line(&self) -> Result<String, ConfirmError> {
        let mut line =
            serde_json::to_string(self).map_err(|e| ConfirmError::Protocol(e.to_string()))?;
        line.push('\n');
        Ok(line)
    }
}
