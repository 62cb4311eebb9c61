//! # formbridge Protocols
//!
//! Data model, error taxonomy and seam traits shared by the field-automation
//! pipeline. Contains only definitions - no OS integration.
//!
//! ## Core Traits
//!
//! - [`WindowInventory`] - Enumerate capturable windows
//! - [`CaptureService`] - Capture a still image of a window
//! - [`DisplayInfo`] - Primary display geometry
//! - [`Extractor`] - Detect fields and propose values from an image
//! - [`WindowActivator`] - Bring a window to the foreground
//! - [`InputDriver`] - Synthetic pointer and keyboard events
//! - [`Confirmer`] - Ask a human to approve a field before it is typed

pub mod confirm;
pub mod desktop;
pub mod error;
pub mod extract;
pub mod types;

pub use confirm::Confirmer;
pub use desktop::{CaptureService, DisplayInfo, InputDriver, WindowActivator, WindowInventory};
pub use error::{
    ActivationError, CaptureError, ConfirmError, ExtractionError, InputError,
    MalformedFieldError, PipelineError,
};
pub use extract::{EXTRACTION_PROTOCOL_VERSION, Extractor};
pub use types::*;
