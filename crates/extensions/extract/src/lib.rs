//! Extraction gateway for formbridge.
//!
//! Runs the external field-detection program once per request: the JSON
//! context goes in as the last argument, the image as a data URL on stdin,
//! and one JSON document comes back on stdout.

mod gateway;
mod response;

pub use gateway::{PROTOCOL_VERSION_ENV, SubprocessExtractor};
pub use response::parse_response;
