//! Error types for the formbridge pipeline.

mod capture;
mod confirm;
mod extraction;
mod field;
mod input;
mod pipeline;

pub use capture::*;
pub use confirm::*;
pub use extraction::*;
pub use field::*;
pub use input::*;
pub use pipeline::*;
