//! Overlay surface running as a child process.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, warn};

use formbridge_protocols::{ConfirmError, Rect};

use crate::message::{HostCommand, SurfaceEvent};
use crate::surface::{OverlayLauncher, OverlaySurface};

/// Launches `program args... --bounds x,y,w,h` per prompt.
///
/// The child reads [`HostCommand`] lines on stdin and writes
/// [`SurfaceEvent`] lines on stdout.
#[derive(Debug, Clone)]
pub struct ProcessOverlayLauncher {
    program: String,
    args: Vec<String>,
    close_grace: Duration,
}

impl ProcessOverlayLauncher {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            close_grace: Duration::from_secs(2),
        }
    }

    /// How long a closing surface may take to exit before it is killed.
    pub fn with_close_grace(mut self, grace: Duration) -> Self {
        self.close_grace = grace;
        self
    }
}

#[async_trait]
impl OverlayLauncher for ProcessOverlayLauncher {
    async fn open(&self, display: Rect) -> Result<Box<dyn OverlaySurface>, ConfirmError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("--bounds")
            .arg(display.to_arg())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ConfirmError::Launch(format!("{}: {}", self.program, e)))?;

        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ConfirmError::Launch("overlay stdout not captured".to_string()))?;
        debug!("Overlay {} started (pid {:?})", self.program, child.id());

        Ok(Box::new(ProcessSurface {
            child,
            stdin,
            lines: BufReader::new(stdout).lines(),
            close_grace: self.close_grace,
            closed: false,
        }))
    }
}

struct ProcessSurface {
    child: Child,
    stdin: Option<ChildStdin>,
    lines: Lines<BufReader<ChildStdout>>,
    close_grace: Duration,
    closed: bool,
}

#[async_trait]
impl OverlaySurface for ProcessSurface {
    async fn next_event(&mut self) -> Result<SurfaceEvent, ConfirmError> {
        loop {
            match self.lines.next_line().await? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return SurfaceEvent::parse_line(&line),
                None => return Err(ConfirmError::SurfaceClosed),
            }
        }
    }

    async fn send(&mut self, command: &HostCommand) -> Result<(), ConfirmError> {
        let stdin = self.stdin.as_mut().ok_or(ConfirmError::SurfaceClosed)?;
        let line = command.to_line()?;
        stdin.write_all(line.as_bytes()).await?;
        stdin.flush().await?;
        Ok(())
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // EOF on stdin asks the overlay to exit on its own.
        drop(self.stdin.take());

        match timeout(self.close_grace, self.child.wait()).await {
            Ok(Ok(status)) => debug!("Overlay exited with {}", status),
            Ok(Err(e)) => warn!("Failed waiting for overlay: {}", e),
            Err(_) => {
                warn!("Overlay did not exit within {:?}, killing", self.close_grace);
                if let Err(e) = self.child.kill().await {
                    warn!("Failed to kill overlay: {}", e);
                }
            }
        }
    }
}
