//! HTTP interface module.
//!
//! Provides REST API endpoints for:
//! - Window listing and capture
//! - Field extraction
//! - Input replay and the one-shot pipeline
//! - Health checks and recent log entries

pub mod handlers;
pub mod logs;
pub mod routes;

pub(crate) mod monitoring;
