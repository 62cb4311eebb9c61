//! Desktop integration for formbridge.
//!
//! OS-facing implementations of the pipeline seams:
//!
//! - [`XcapInventory`] - list capturable windows, excluding the host
//! - [`XcapCaptureService`] - capture a window at the canonical resolution
//! - [`ScreenDisplay`] - primary display geometry
//! - [`ScriptActivator`] - bring a window forward via the platform's scripting tool
//! - [`EnigoInputDriver`] - synthetic pointer and keyboard events

mod activation;
mod capture;
mod display;
mod input;
mod inventory;

pub use activation::ScriptActivator;
pub use capture::XcapCaptureService;
pub use display::ScreenDisplay;
pub use input::{EnigoInputDriver, InputController};
pub use inventory::XcapInventory;
