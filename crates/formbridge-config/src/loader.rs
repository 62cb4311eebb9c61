//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        if let Some(dir) = config.extraction.working_dir.take() {
            let dir = Self::expand_path(&dir.to_string_lossy());
            config.extraction.working_dir = Some(PathBuf::from(dir));
        }
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    ///
    /// Parse errors in an existing file are still reported.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Expand environment variables in the format `${VAR}` or `${VAR:-default}`.
    ///
    /// The default applies when `VAR` is unset or empty.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidValue {
            field: "env".to_string(),
            message: e.to_string(),
        })?;

        for cap in re.captures_iter(content) {
            let (var_name, fallback) = match cap[1].split_once(":-") {
                Some((name, fallback)) => (name, Some(fallback)),
                None => (&cap[1], None),
            };
            let var_value = match (std::env::var(var_name), fallback) {
                (Ok(value), Some(fallback)) if value.is_empty() => fallback.to_string(),
                (Ok(value), _) => value,
                (Err(_), Some(fallback)) => fallback.to_string(),
                (Err(_), None) => return Err(ConfigError::EnvVarNotSet(var_name.to_string())),
            };
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.formbridge`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

/// Per-user data directory (`~/.formbridge`), used for logs.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".formbridge")
}

/// Config file looked up when none is given on the command line.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config/formbridge.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.host.app_name, "formbridge");
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [server]
            host = "0.0.0.0"
            port = 3000
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[replay]").unwrap();
        writeln!(file, "field_delay_ms = 75").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.replay.field_delay_ms, 75);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/formbridge.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/formbridge.toml")).unwrap();
        assert_eq!(config.capture.width, 1920);
    }

    #[test]
    fn test_load_or_default_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid = [unclosed").unwrap();

        let result = ConfigLoader::load_or_default(file.path());
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("FORMBRIDGE_TEST_EXTRACTOR", "/opt/detect");
        }
        let content = "[extraction]\nprogram = \"${FORMBRIDGE_TEST_EXTRACTOR}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.extraction.program, "/opt/detect");
        unsafe {
            std::env::remove_var("FORMBRIDGE_TEST_EXTRACTOR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_FORMBRIDGE_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_default_when_unset() {
        let content = "[extraction]\nprogram = \"${NONEXISTENT_FORMBRIDGE_VAR_67890:-python3.12}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.extraction.program, "python3.12");
    }

    #[test]
    fn test_expand_env_vars_set_value_beats_default() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("FORMBRIDGE_TEST_PORT", "9100");
        }
        let content = "[server]\nport = ${FORMBRIDGE_TEST_PORT:-8000}";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.port, 9100);
        unsafe {
            std::env::remove_var("FORMBRIDGE_TEST_PORT");
        }
    }

    #[test]
    fn test_expand_env_vars_empty_default() {
        let expanded = ConfigLoader::expand_env_vars("x = \"${NONEXISTENT_FORMBRIDGE_VAR_13579:-}\"").unwrap();
        assert_eq!(expanded, "x = \"\"");
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_working_dir_tilde_expanded() {
        let content = r#"
            [extraction]
            working_dir = "~/extractor"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let dir = config.extraction.working_dir.unwrap();
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.ends_with("extractor"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/usr/local/bin";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }

    #[test]
    fn test_shipped_config_loads() {
        let config = ConfigLoader::load_str(include_str!("../../../config/formbridge.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.confirmation.timeout_secs, Some(60));
        assert!(config.confirmation.overlay_program.is_none());
        assert!(config.host.refocus_after_capture);
        assert!(config.replay.restore_focus);
    }

    #[test]
    fn test_default_data_dir() {
        assert!(default_data_dir().ends_with(".formbridge"));
    }
}
