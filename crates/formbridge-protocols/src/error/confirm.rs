//! Confirmation handshake errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfirmError {
    #[error("Failed to launch confirmation overlay: {0}")]
    Launch(String),

    #[error("Confirmation overlay closed before responding")]
    SurfaceClosed,

    #[error("Confirmation protocol violation: {0}")]
    Protocol(String),

    #[error("No confirmation response within {0} seconds")]
    Timeout(u64),

    #[error("Overlay I/O error: {0}")]
    Io(#[from] std::io::Error),
}
