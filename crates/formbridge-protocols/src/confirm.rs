//! Confirmation seam.

use async_trait::async_trait;

use crate::error::ConfirmError;
use crate::types::{ConfirmChoice, FieldPrompt};

/// Asks a human to accept or reject a single field.
///
/// Resolves exactly once per call; any surface created for the prompt is
/// torn down before returning, on every path.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: FieldPrompt) -> Result<ConfirmChoice, ConfirmError>;
}
