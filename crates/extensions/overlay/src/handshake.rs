//! Per-field handshake state machine.

use formbridge_protocols::{ConfirmChoice, ConfirmError};

use crate::message::{HostCommand, SurfaceEvent};

/// `Idle -> PromptShown -> Accepted | Rejected`.
///
/// Resolves exactly once; any event after resolution is a protocol error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakeState {
    #[default]
    Idle,
    PromptShown,
    Accepted,
    Rejected,
}

impl HandshakeState {
    pub fn is_resolved(self) -> bool {
        matches!(self, HandshakeState::Accepted | HandshakeState::Rejected)
    }

    pub fn choice(self) -> Option<ConfirmChoice> {
        match self {
            HandshakeState::Accepted => Some(ConfirmChoice::Accept),
            HandshakeState::Rejected => Some(ConfirmChoice::Reject),
            _ => None,
        }
    }

    /// Apply one surface event. Returns the command to send back, if any.
    ///
    /// `prompt` is only used on `Idle -> PromptShown`.
    pub fn advance(
        &mut self,
        event: SurfaceEvent,
        prompt: &HostCommand,
    ) -> Result<Option<HostCommand>, ConfirmError> {
        match (*self, event) {
            (HandshakeState::Idle, SurfaceEvent::OverlayReady) => {
                *self = HandshakeState::PromptShown;
                Ok(Some(prompt.clone()))
            }
            (HandshakeState::Idle, SurfaceEvent::FieldConfirmResponse { .. }) => Err(
                ConfirmError::Protocol("response received before the prompt was shown".to_string()),
            ),
            // A repeated ready signal does not re-send the prompt.
            (HandshakeState::PromptShown, SurfaceEvent::OverlayReady) => Ok(None),
            (HandshakeState::PromptShown, SurfaceEvent::FieldConfirmResponse { choice }) => {
                *self = match choice {
                    ConfirmChoice::Accept => HandshakeState::Accepted,
                    ConfirmChoice::Reject => HandshakeState::Rejected,
                };
                Ok(None)
            }
            (state, event) => Err(ConfirmError::Protocol(format!(
                "{:?} received after the handshake resolved ({:?})",
                event, state
            ))),
        }
    }
}
