//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::MonitorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from TOML text without validating it.
pub fn parse_config(content: &str) -> Result<MonitorConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let config = parse_config(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), endpoints = config.endpoints.len(), "Configuration loaded");
    Ok(config)
}

/// Load from an explicit path, or from `DEFAULT_CONFIG_PATH`.
///
/// An explicit path must exist. A missing default file yields the built-in
/// defaults, which carry no endpoints and therefore fail validation.
pub fn load_config_or_default(path: Option<&Path>) -> Result<MonitorConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => load_optional(Path::new(DEFAULT_CONFIG_PATH)),
    }
}

/// Load `path` if it exists, otherwise validate the built-in defaults.
fn load_optional(path: &Path) -> Result<MonitorConfig, ConfigError> {
    match load_config(path) {
        Err(ConfigError::NotFound(_)) => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            let config = MonitorConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
        other => other,
    }
}
