//! Endpoint and result types shared by the probe, runner and engine.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::{Serialize, Serializer};
use url::Url;

/// Default status code an endpoint must answer with to count as healthy.
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// A fully resolved endpoint to be health-checked.
///
/// Built once from configuration with all monitor-level defaults applied.
/// Shared read-only for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointSpec {
    /// Unique endpoint name (used in logs and results).
    pub name: String,
    /// Absolute http(s) URL to request.
    pub url: Url,
    /// HTTP method for every attempt.
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    /// Status code that counts as success.
    pub expected_status: u16,
    /// Hard deadline for a single attempt.
    #[serde(rename = "timeout_ms", serialize_with = "serialize_millis")]
    pub timeout: Duration,
    /// Retries after the first attempt (total attempts = retries + 1).
    pub retries: u32,
}

impl EndpointSpec {
    /// Create a GET spec expecting 200.
    pub fn new(name: impl Into<String>, url: Url, timeout: Duration, retries: u32) -> Self {
        Self {
            name: name.into(),
            url,
            method: Method::GET,
            expected_status: DEFAULT_EXPECTED_STATUS,
            timeout,
            retries,
        }
    }

    pub fn with_expected_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Upper bound on attempts for this endpoint.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Classified result of one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Response status matched the expected status.
    Success { status_code: u16 },
    /// Response received with any other status.
    UnexpectedStatus { status_code: u16 },
    /// Attempt exceeded its deadline.
    Timeout,
    /// Network, DNS or TLS failure. `detail` is diagnostic only.
    ConnectionError { detail: String },
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success { .. })
    }

    /// Stable label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AttemptOutcome::Success { .. } => "success",
            AttemptOutcome::UnexpectedStatus { .. } => "unexpected_status",
            AttemptOutcome::Timeout => "timeout",
            AttemptOutcome::ConnectionError { .. } => "connection_error",
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            AttemptOutcome::Success { status_code }
            | AttemptOutcome::UnexpectedStatus { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::Success { status_code } => write!(f, "success ({})", status_code),
            AttemptOutcome::UnexpectedStatus { status_code } => {
                write!(f, "unexpected status {}", status_code)
            }
            AttemptOutcome::Timeout => write!(f, "timeout"),
            AttemptOutcome::ConnectionError { detail } => write!(f, "connection error: {}", detail),
        }
    }
}

/// Terminal result for one endpoint in one run.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointResult {
    pub endpoint: Arc<EndpointSpec>,
    /// Outcome of the last attempt made.
    pub outcome: AttemptOutcome,
    pub attempts_used: u32,
    pub healthy: bool,
    /// Wall time across all attempts, including retry delays.
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl EndpointResult {
    /// Build the terminal result; health is derived from the outcome.
    pub fn new(
        endpoint: Arc<EndpointSpec>,
        outcome: AttemptOutcome,
        attempts_used: u32,
        elapsed: Duration,
    ) -> Self {
        let healthy = outcome.is_success();
        Self {
            endpoint,
            outcome,
            attempts_used,
            healthy,
            elapsed,
        }
    }

    pub fn name(&self) -> &str {
        &self.endpoint.name
    }
}

/// Aggregate of one run over all endpoints, in configuration order.
///
/// Counts are derived from `results` on construction and cannot drift.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    total: usize,
    healthy_count: usize,
    results: Vec<EndpointResult>,
}

impl RunSummary {
    pub fn from_results(results: Vec<EndpointResult>) -> Self {
        let healthy_count = results.iter().filter(|r| r.healthy).count();
        Self {
            total: results.len(),
            healthy_count,
            results,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn healthy_count(&self) -> usize {
        self.healthy_count
    }

    pub fn unhealthy_count(&self) -> usize {
        self.total - self.healthy_count
    }

    pub fn all_healthy(&self) -> bool {
        self.healthy_count == self.total
    }

    pub fn results(&self) -> &[EndpointResult] {
        &self.results
    }

    /// Unhealthy results, in configuration order.
    pub fn failed(&self) -> impl Iterator<Item = &EndpointResult> {
        self.results.iter().filter(|r| !r.healthy)
    }

    pub fn into_results(self) -> Vec<EndpointResult> {
        self.results
    }
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
