//! # formbridge API
//!
//! Localhost HTTP surface used by the host UI: list windows, capture,
//! extract, replay, or run the whole pipeline in one call.
//!
//! All routes live under `/api/v1`; see [`create_router`].

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{ApiServer, ServerConfig};
pub use state::AppState;
