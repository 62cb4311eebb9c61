//! Top-level pipeline error type.

use thiserror::Error;

use super::{CaptureError, ExtractionError, InputError};

/// Errors that abort a whole automation request.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Background task failed: {0}")]
    Join(String),
}
