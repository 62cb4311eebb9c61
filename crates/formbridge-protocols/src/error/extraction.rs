//! Extraction gateway errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The extraction subprocess could not be started.
    #[error("Failed to start extraction process: {0}")]
    Spawn(String),

    /// The subprocess ran and exited with failure.
    #[error("Extraction process exited with {}\n{diagnostics}", exit_label(.code))]
    Failed {
        code: Option<i32>,
        diagnostics: String,
    },

    /// The subprocess succeeded but its output is not the expected document.
    #[error("Extraction protocol violation: {0}")]
    Protocol(String),

    #[error("Extraction timed out after {0} seconds")]
    Timeout(u64),

    #[error("Extraction I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}
