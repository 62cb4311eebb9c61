//! Data model of the field-automation pipeline.
//!
//! All entities are short-lived: created per automation request and
//! discarded after replay.

mod capture;
mod field;
mod prompt;
mod request;
mod window;

pub use capture::*;
pub use field::*;
pub use prompt::*;
pub use request::*;
pub use window::*;
