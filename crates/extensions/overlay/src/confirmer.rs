//! [`Confirmer`] backed by an overlay surface.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use formbridge_protocols::{ConfirmChoice, ConfirmError, Confirmer, DisplayInfo, FieldPrompt};

use crate::handshake::HandshakeState;
use crate::message::HostCommand;
use crate::surface::{OverlayLauncher, OverlaySurface};

/// Opens one overlay per field prompt and waits for the user's choice.
pub struct OverlayConfirmer {
    launcher: Arc<dyn OverlayLauncher>,
    display: Arc<dyn DisplayInfo>,
    timeout: Option<Duration>,
}

impl OverlayConfirmer {
    /// `timeout` of `None` waits indefinitely for a response.
    pub fn new(
        launcher: Arc<dyn OverlayLauncher>,
        display: Arc<dyn DisplayInfo>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            launcher,
            display,
            timeout,
        }
    }
}

#[async_trait]
impl Confirmer for OverlayConfirmer {
    async fn confirm(&self, prompt: FieldPrompt) -> Result<ConfirmChoice, ConfirmError> {
        let info = self.display.clone();
        let display = tokio::task::spawn_blocking(move || info.primary_display())
            .await
            .map_err(|e| ConfirmError::Launch(format!("display query panicked: {}", e)))?
            .map_err(|e| ConfirmError::Launch(e.to_string()))?;

        // The overlay covers the display; the prompt is placed in its local space.
        let command = HostCommand::ShowFieldConfirm {
            x: prompt.x - display.x,
            y: prompt.y - display.y,
            text: prompt.text.clone(),
        };

        let mut surface = self.launcher.open(display).await?;
        let outcome = match self.timeout {
            Some(limit) => timeout(limit, run_handshake(surface.as_mut(), &command))
                .await
                .unwrap_or(Err(ConfirmError::Timeout(limit.as_secs()))),
            None => run_handshake(surface.as_mut(), &command).await,
        };
        surface.close().await;

        match &outcome {
            Ok(choice) => info!("Field {} confirmation: {:?}", prompt.field_id, choice),
            Err(e) => warn!("Field {} confirmation failed: {}", prompt.field_id, e),
        }
        outcome
    }
}

async fn run_handshake(
    surface: &mut dyn OverlaySurface,
    command: &HostCommand,
) -> Result<ConfirmChoice, ConfirmError> {
    let mut state = HandshakeState::Idle;
    loop {
        let event = surface.next_event().await?;
        debug!("Overlay event {:?} in state {:?}", event, state);
        if let Some(reply) = state.advance(event, command)? {
            surface.send(&reply).await?;
        }
        if let Some(choice) = state.choice() {
            return Ok(choice);
        }
    }
}

#[cfg(test)]
#[path = "confirmer_tests.rs"]
mod tests;
