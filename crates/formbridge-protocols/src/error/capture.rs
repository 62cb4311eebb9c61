//! Window inventory and capture errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// The referenced window/source no longer exists.
    #[error("Window not found: {0}")]
    NotFound(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("No monitor found")]
    NoMonitor,
}
