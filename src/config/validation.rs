//! Configuration validation and endpoint resolution.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, status codes, pool size)
//! - Resolve monitor-level defaults into `EndpointSpec`s
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Nothing reaches the engine unless every check passes

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::schema::{BackoffKind, MonitorConfig};
use crate::health::types::{EndpointSpec, DEFAULT_EXPECTED_STATUS};
use crate::resilience::backoff::RetryDelay;
use crate::resilience::retries::RetryPolicy;

/// One semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `endpoints[2].url`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check the whole config, collecting every problem.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    resolve_endpoints(config).map(|_| ())
}

/// Validate and turn the config into engine-ready endpoint specs.
pub fn resolve_endpoints(config: &MonitorConfig) -> Result<Vec<Arc<EndpointSpec>>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let monitor = &config.monitor;

    if EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(ValidationError::new(
            "logging.level",
            format!("invalid log filter '{}'", config.logging.level),
        ));
    }

    let default_timeout = check_timeout("monitor.timeout", monitor.timeout, &mut errors);
    check_delay("monitor.delay", monitor.delay, &mut errors);
    check_delay("monitor.max_delay", monitor.max_delay, &mut errors);
    let default_method = check_method("monitor.method", &monitor.method, &mut errors);

    if monitor.concurrency == 0 {
        errors.push(ValidationError::new("monitor.concurrency", "must be at least 1"));
    }

    if config.endpoints.is_empty() {
        errors.push(ValidationError::new("endpoints", "no endpoints configured"));
    }

    let mut seen = HashSet::new();
    let mut specs = Vec::with_capacity(config.endpoints.len());

    for (i, endpoint) in config.endpoints.iter().enumerate() {
        let field = |name: &str| format!("endpoints[{}].{}", i, name);
        let errors_before = errors.len();

        let name = endpoint.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::new(field("name"), "must not be empty"));
        } else if !seen.insert(name.to_string()) {
            errors.push(ValidationError::new(field("name"), format!("duplicate endpoint name '{}'", name)));
        }

        let url = match Url::parse(&endpoint.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
            Ok(url) => {
                errors.push(ValidationError::new(
                    field("url"),
                    format!("unsupported scheme '{}' (expected http or https)", url.scheme()),
                ));
                None
            }
            Err(e) => {
                errors.push(ValidationError::new(field("url"), format!("invalid URL '{}': {}", endpoint.url, e)));
                None
            }
        };

        let timeout = match endpoint.timeout {
            Some(secs) => check_timeout(&field("timeout"), secs, &mut errors),
            None => default_timeout,
        };

        let method = match &endpoint.method {
            Some(method) => check_method(&field("method"), method, &mut errors),
            None => default_method.clone(),
        };

        let expected_status = endpoint.expected_status.unwrap_or(DEFAULT_EXPECTED_STATUS);
        if !(100..=599).contains(&expected_status) {
            errors.push(ValidationError::new(
                field("expected_status"),
                format!("{} is not an HTTP status code", expected_status),
            ));
        } else if expected_status < 200 {
            errors.push(ValidationError::new(
                field("expected_status"),
                format!("{} is informational and never a final response", expected_status),
            ));
        }

        if errors.len() > errors_before {
            continue;
        }

        if let (Some(url), Some(timeout), Some(method)) = (url, timeout, method) {
            let spec = EndpointSpec::new(name, url, timeout, endpoint.retries.unwrap_or(monitor.retries))
                .with_expected_status(expected_status)
                .with_method(method);
            specs.push(Arc::new(spec));
        }
    }

    if errors.is_empty() {
        Ok(specs)
    } else {
        Err(errors)
    }
}

/// Retry policy described by the `[monitor]` section.
///
/// Expects a validated config; out-of-range delays fall back to no delay.
pub fn retry_policy(config: &MonitorConfig) -> RetryPolicy {
    let monitor = &config.monitor;
    let (Ok(delay), Ok(max)) = (
        Duration::try_from_secs_f64(monitor.delay),
        Duration::try_from_secs_f64(monitor.max_delay),
    ) else {
        return RetryPolicy::immediate();
    };

    if delay.is_zero() {
        return RetryPolicy::immediate();
    }

    match monitor.backoff {
        BackoffKind::Fixed => RetryPolicy::new(RetryDelay::Fixed(delay)),
        BackoffKind::Exponential => RetryPolicy::new(RetryDelay::Exponential { base: delay, max }),
    }
}

fn check_timeout(field: &str, secs: f64, errors: &mut Vec<ValidationError>) -> Option<Duration> {
    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => Some(timeout),
        _ => {
            errors.push(ValidationError::new(field, format!("must be a positive number of seconds, got {}", secs)));
            None
        }
    }
}

fn check_delay(field: &str, secs: f64, errors: &mut Vec<ValidationError>) {
    if Duration::try_from_secs_f64(secs).is_err() {
        errors.push(ValidationError::new(field, format!("must be zero or a positive number of seconds, got {}", secs)));
    }
}

fn check_method(field: &str, method: &str, errors: &mut Vec<ValidationError>) -> Option<Method> {
    match Method::from_bytes(method.to_ascii_uppercase().as_bytes()) {
        Ok(method) => Some(method),
        Err(_) => {
            errors.push(ValidationError::new(field, format!("invalid HTTP method '{}'", method)));
            None
        }
    }
}
