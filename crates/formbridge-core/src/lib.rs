//! # formbridge Core
//!
//! Coordinate mapping, the input replay engine and the
//! capture-extract-replay pipeline.
//!
//! ## Components
//!
//! - [`ReplayEngine`] - Types a field mapping into a window, one request at a time
//! - [`Pipeline`] - Capture, extraction and replay wired together
//! - [`RequestContext`] - Per-request correlation state
//! - [`map_to_screen`] - Image-pixel to screen coordinates

pub mod context;
pub mod mapper;
pub mod pipeline;
pub mod replay;

#[cfg(test)]
mod testing;

pub use context::RequestContext;
pub use mapper::{map_point, map_to_screen, prompt_anchor};
pub use pipeline::{Pipeline, RunReport};
pub use replay::ReplayEngine;
