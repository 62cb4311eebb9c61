//! Overlay surface seam.

use async_trait::async_trait;

use formbridge_protocols::{ConfirmError, Rect};

use crate::message::{HostCommand, SurfaceEvent};

/// A live confirmation surface.
#[async_trait]
pub trait OverlaySurface: Send {
    /// Next event from the surface; `SurfaceClosed` once it goes away.
    async fn next_event(&mut self) -> Result<SurfaceEvent, ConfirmError>;

    async fn send(&mut self, command: &HostCommand) -> Result<(), ConfirmError>;

    /// Tear the surface down. Must be safe to call on a dead surface.
    async fn close(&mut self);
}

/// Creates one surface per prompt, covering `display`.
#[async_trait]
pub trait OverlayLauncher: Send + Sync {
    async fn open(&self, display: Rect) -> Result<Box<dyn OverlaySurface>, ConfirmError>;
}
