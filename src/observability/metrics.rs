//! Metrics collection.
//!
//! # Metrics
//! - `monitor_attempts_total` (counter): attempts by endpoint, outcome
//! - `monitor_attempt_duration_seconds` (histogram): per-attempt latency
//! - `monitor_endpoint_healthy` (gauge): 1=healthy, 0=unhealthy
//! - `monitor_run_endpoints_total` (gauge): endpoints in the last run
//! - `monitor_run_endpoints_healthy` (gauge): healthy endpoints in the last run
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder every call is a no-op.

use std::time::Duration;

use crate::health::types::{AttemptOutcome, EndpointResult, RunSummary};

pub fn record_attempt(endpoint: &str, outcome: &AttemptOutcome, duration: Duration) {
    let endpoint = endpoint.to_string();
    ::metrics::counter!(
        "monitor_attempts_total",
        "endpoint" => endpoint.clone(),
        "outcome" => outcome.kind()
    )
    .increment(1);
    ::metrics::histogram!("monitor_attempt_duration_seconds", "endpoint" => endpoint)
        .record(duration.as_secs_f64());
}

pub fn record_endpoint_result(result: &EndpointResult) {
    ::metrics::gauge!("monitor_endpoint_healthy", "endpoint" => result.name().to_string())
        .set(if result.healthy { 1.0 } else { 0.0 });
}

pub fn record_run(summary: &RunSummary) {
    ::metrics::gauge!("monitor_run_endpoints_total").set(summary.total() as f64);
    ::metrics::gauge!("monitor_run_endpoints_healthy").set(summary.healthy_count() as f64);
}
