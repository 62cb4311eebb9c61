//! Desktop seams: window inventory, capture, activation and synthetic input.

use async_trait::async_trait;

use crate::error::{ActivationError, CaptureError, InputError};
use crate::types::{ActivationOutcome, CaptureResult, Rect, WindowHandle};

/// Enumerates capturable on-screen windows.
///
/// Implementations exclude untitled windows and the host process itself.
/// Calls block on the OS and should be run off the async executor.
pub trait WindowInventory: Send + Sync {
    fn list_windows(&self) -> Result<Vec<WindowHandle>, CaptureError>;
}

/// Captures a still image of a window.
pub trait CaptureService: Send + Sync {
    /// Fails with [`CaptureError::NotFound`] if `id` is no longer among the
    /// capturable sources.
    fn capture(&self, id: &str) -> Result<CaptureResult, CaptureError>;
}

/// Geometry of the primary display.
pub trait DisplayInfo: Send + Sync {
    fn primary_display(&self) -> Result<Rect, CaptureError>;
}

/// Brings a window to the foreground by exact title.
#[async_trait]
pub trait WindowActivator: Send + Sync {
    async fn activate(&self, title: &str) -> Result<ActivationOutcome, ActivationError>;

    /// Title of the window currently in front, so it can be re-activated later.
    ///
    /// `None` when the platform cannot tell.
    async fn frontmost(&self) -> Result<Option<String>, ActivationError> {
        Ok(None)
    }
}

/// Synthetic pointer and keyboard device.
///
/// There is one device per desktop session; callers serialise access.
#[async_trait]
pub trait InputDriver: Send + Sync {
    async fn move_pointer(&self, x: i32, y: i32) -> Result<(), InputError>;

    /// Primary-button click at the current pointer position.
    async fn click(&self) -> Result<(), InputError>;

    async fn type_text(&self, text: &str) -> Result<(), InputError>;
}
