//! Extraction subprocess client.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use formbridge_protocols::{
    EXTRACTION_PROTOCOL_VERSION, ExtractionError, ExtractionResult, Extractor, IMAGE_CONTENT_TYPE,
    encode_data_url,
};

use crate::response::parse_response;

/// Environment variable telling the subprocess which contract it speaks.
pub const PROTOCOL_VERSION_ENV: &str = "FORMBRIDGE_PROTOCOL_VERSION";

/// Runs one extraction subprocess per call.
///
/// Invoked as `program args... <context-json>`; stdin receives the image as
/// a `data:image/png;base64,...` URL and is then closed.
#[derive(Debug, Clone)]
pub struct SubprocessExtractor {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl SubprocessExtractor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            timeout: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Kill the subprocess if it has not exited after `duration`.
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    fn command(&self, context_json: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(context_json)
            .env(PROTOCOL_VERSION_ENV, EXTRACTION_PROTOCOL_VERSION.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

#[async_trait]
impl Extractor for SubprocessExtractor {
    async fn extract(
        &self,
        image: &[u8],
        context: &serde_json::Value,
    ) -> Result<ExtractionResult, ExtractionError> {
        let context_json = serde_json::to_string(context)
            .map_err(|e| ExtractionError::Protocol(format!("context is not serializable: {}", e)))?;
        let payload = encode_data_url(IMAGE_CONTENT_TYPE, image);
        let started = Instant::now();

        let mut child = self
            .command(&context_json)
            .spawn()
            .map_err(|e| ExtractionError::Spawn(format!("{}: {}", self.program, e)))?;
        debug!(
            "Spawned extraction process {} (pid {:?}, {} byte payload)",
            self.program,
            child.id(),
            payload.len()
        );

        // Feed stdin while stdout/stderr drain, so a child that writes
        // before reading everything cannot deadlock on a full pipe.
        let stdin = child.stdin.take();
        let writer = tokio::spawn(async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(payload.as_bytes()).await {
                // The child may legitimately stop reading early.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        });

        let output = match self.timeout {
            Some(duration) => timeout(duration, child.wait_with_output())
                .await
                .map_err(|_| {
                    warn!("Extraction process exceeded {:?}, killed", duration);
                    ExtractionError::Timeout(duration.as_secs())
                })??,
            None => child.wait_with_output().await?,
        };

        let write_result = writer
            .await
            .map_err(|e| ExtractionError::Io(std::io::Error::other(e.to_string())))?;

        if !output.status.success() {
            let diagnostics = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                "Extraction process failed ({}): {}",
                output.status,
                diagnostics.lines().last().unwrap_or_default()
            );
            return Err(ExtractionError::Failed {
                code: output.status.code(),
                diagnostics,
            });
        }
        write_result?;

        let result = parse_response(&output.stdout)?;
        info!(
            "Extraction finished in {:?}: {} boxes, {} values",
            started.elapsed(),
            result.bbox_dict.len(),
            result.mapping.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
