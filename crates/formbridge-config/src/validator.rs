//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Settle delays above this are legal but almost certainly a mistake.
const LONG_DELAY_MS: u64 = 10_000;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_host(config, &mut result);
        Self::validate_server(config, &mut result);
        Self::validate_capture(config, &mut result);
        Self::validate_extraction(config, &mut result);
        Self::validate_replay(config, &mut result);

        Ok(result)
    }

    /// Validate and turn the first error into a `ConfigError`.
    pub fn check(config: &Config) -> Result<Vec<ValidationWarning>, ConfigError> {
        let result = Self::validate(config)?;
        match result.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(result.warnings),
        }
    }

    fn validate_host(config: &Config, result: &mut ValidationResult) {
        if config.host.app_name.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "host.app_name",
                "app_name is empty, the host window will appear in the window list",
            ));
        }
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_capture(config: &Config, result: &mut ValidationResult) {
        if config.capture.width == 0 {
            result.add_error(ValidationError::new(
                "capture.width",
                "width must be greater than 0",
            ));
        }
        if config.capture.height == 0 {
            result.add_error(ValidationError::new(
                "capture.height",
                "height must be greater than 0",
            ));
        }
    }

    fn validate_extraction(config: &Config, result: &mut ValidationResult) {
        if config.extraction.program.trim().is_empty() {
            result.add_error(ValidationError::new(
                "extraction.program",
                "Extraction program cannot be empty",
            ));
        }

        if let Some(ref dir) = config.extraction.working_dir {
            if !dir.exists() {
                result.add_warning(ValidationWarning::new(
                    "extraction.working_dir",
                    format!("Working directory does not exist: {:?}", dir),
                ));
            }
        }
    }

    fn validate_replay(config: &Config, result: &mut ValidationResult) {
        let replay = &config.replay;
        let delays = [
            ("replay.activation_settle_ms", replay.activation_settle_ms),
            ("replay.move_settle_ms", replay.move_settle_ms),
            ("replay.click_settle_ms", replay.click_settle_ms),
            ("replay.field_delay_ms", replay.field_delay_ms),
        ];
        for (path, value) in delays {
            if value > LONG_DELAY_MS {
                result.add_warning(ValidationWarning::new(
                    path,
                    format!("{}ms is very long (>{}ms), replays will be slow", value, LONG_DELAY_MS),
                ));
            }
        }

        if replay.confirm_fields && config.confirmation.overlay_program.is_none() {
            result.add_error(ValidationError::new(
                "confirmation.overlay_program",
                "overlay_program must be set when replay.confirm_fields is enabled",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
