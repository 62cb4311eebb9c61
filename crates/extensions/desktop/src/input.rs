//! Synthetic mouse and keyboard input.

use async_trait::async_trait;
use enigo::{Button, Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};
use tracing::debug;

use formbridge_protocols::{InputDriver, InputError};

/// Thin wrapper over an enigo device.
///
/// Not `Send` on every platform; create one per blocking task.
pub struct InputController {
    enigo: Enigo,
}

impl InputController {
    /// Create a new input controller.
    pub fn new() -> Result<Self, InputError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| InputError::Unavailable(e.to_string()))?;
        Ok(Self { enigo })
    }

    /// Move mouse to absolute position.
    pub fn mouse_move(&mut self, x: i32, y: i32) -> Result<(), InputError> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    /// Left click at the current position.
    pub fn left_click(&mut self) -> Result<(), InputError> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| InputError::Failed(e.to_string()))
    }

    /// Type a string of text.
    pub fn type_text(&mut self, text: &str) -> Result<(), InputError> {
        if text.is_empty() {
            return Ok(());
        }
        self.enigo
            .text(text)
            .map_err(|e| InputError::Failed(e.to_string()))
    }
}

/// [`InputDriver`] backed by enigo.
///
/// Each call runs on the blocking pool with a fresh [`InputController`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EnigoInputDriver;

impl EnigoInputDriver {
    pub fn new() -> Self {
        Self
    }

    /// Fail early when no input device can be opened (e.g. headless session).
    pub async fn check_available(&self) -> Result<(), InputError> {
        run_blocking(|| InputController::new().map(|_| ())).await
    }
}

#[async_trait]
impl InputDriver for EnigoInputDriver {
    async fn move_pointer(&self, x: i32, y: i32) -> Result<(), InputError> {
        run_blocking(move || InputController::new()?.mouse_move(x, y)).await?;
        debug!("Pointer moved to ({}, {})", x, y);
        Ok(())
    }

    async fn click(&self) -> Result<(), InputError> {
        run_blocking(|| InputController::new()?.left_click()).await?;
        debug!("Primary click");
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), InputError> {
        let owned = text.to_string();
        let len = owned.chars().count();
        run_blocking(move || InputController::new()?.type_text(&owned)).await?;
        debug!("Typed {} characters", len);
        Ok(())
    }
}

/// Run an enigo call on the blocking thread pool.
async fn run_blocking<F, T>(f: F) -> Result<T, InputError>
where
    F: FnOnce() -> Result<T, InputError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| InputError::Failed(e.to_string()))?
}
