//! Confirmation handshake for formbridge.
//!
//! Before a field is typed, a transparent overlay covering the primary
//! display shows a prompt next to the field and waits for the user to
//! accept or reject it:
//!
//! 1. host launches the overlay surface
//! 2. surface -> host `overlay-ready`
//! 3. host -> surface `show-field-confirm {x, y, text}`
//! 4. surface -> host `field-confirm-response {choice}`
//! 5. host tears the surface down
//!
//! Waiting for step 2 keeps the prompt from being sent before the surface
//! can receive it.

mod confirmer;
mod handshake;
mod message;
mod process;
mod surface;

pub use confirmer::OverlayConfirmer;
pub use handshake::HandshakeState;
pub use message::{HostCommand, SurfaceEvent};
pub use process::ProcessOverlayLauncher;
pub use surface::{OverlayLauncher, OverlaySurface};
