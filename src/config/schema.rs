//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Durations are expressed in (fractional) seconds.

use serde::{Deserialize, Serialize};

/// Root configuration for the health monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// Monitor-level defaults and run settings.
    pub monitor: MonitorSettings,

    /// Endpoints to check, in run order.
    pub endpoints: Vec<EndpointConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter (trace, debug, info, warn, error, or a full directive).
    pub level: String,

    /// Append log lines to this file instead of stderr.
    pub file: Option<String>,

    /// Line format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Monitor-level settings; `timeout`, `retries` and `method` are defaults
/// that individual endpoints may override.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MonitorSettings {
    /// Per-attempt timeout in seconds.
    pub timeout: f64,

    /// Retries after the first attempt.
    pub retries: u32,

    /// Seconds to wait before each retry (0 = back-to-back).
    pub delay: f64,

    /// How `delay` evolves across retries.
    pub backoff: BackoffKind,

    /// Cap for exponential backoff, in seconds.
    pub max_delay: f64,

    /// Endpoints probed at once (1 = sequential).
    pub concurrency: usize,

    /// HTTP method for endpoints that don't set one.
    pub method: String,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            timeout: 5.0,
            retries: 3,
            delay: 0.0,
            backoff: BackoffKind::Fixed,
            max_delay: 30.0,
            concurrency: 1,
            method: "GET".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    #[default]
    Fixed,
    Exponential,
}

/// A single endpoint as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct EndpointConfig {
    /// Unique endpoint identifier for logs and results.
    pub name: String,

    /// Absolute http(s) URL.
    pub url: String,

    /// Overrides `monitor.timeout`.
    #[serde(default)]
    pub timeout: Option<f64>,

    /// Overrides `monitor.retries`.
    #[serde(default)]
    pub retries: Option<u32>,

    /// Status that counts as healthy (default: 200).
    #[serde(default)]
    pub expected_status: Option<u16>,

    /// Overrides `monitor.method`.
    #[serde(default)]
    pub method: Option<String>,
}

impl EndpointConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout: None,
            retries: None,
            expected_status: None,
            method: None,
        }
    }
}
