//! # formbridge config
//!
//! TOML configuration for the formbridge bridge: host identity, HTTP
//! server, capture resolution, extraction subprocess, replay pacing and
//! the confirmation overlay.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, default_config_path, default_data_dir};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
