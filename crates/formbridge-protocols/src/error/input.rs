//! Synthetic input and window activation errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input device unavailable: {0}")]
    Unavailable(String),

    #[error("Input failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("Failed to run activation command: {0}")]
    CommandFailed(String),

    #[error("Window not activated: {0}")]
    NotActivated(String),
}
