//! Per-endpoint attempt loop.
//!
//! # States
//! ```text
//! Attempting ──(success | retries exhausted)──▶ Done
//!     ▲   │
//!     └───┘ retry (after the policy's delay, if any)
//! ```
//!
//! Every attempt is reported, including ones superseded by a retry.
//! Attempt failures end up in the result; nothing propagates as an error.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::Instrument;

use crate::health::probe::Probe;
use crate::health::types::{EndpointResult, EndpointSpec};
use crate::observability::metrics;
use crate::observability::reporter::Reporter;
use crate::resilience::retries::RetryPolicy;

/// Drives a probe under a retry policy for one endpoint at a time.
#[derive(Clone, Copy)]
pub struct EndpointRunner<'a> {
    probe: &'a dyn Probe,
    policy: &'a RetryPolicy,
    reporter: &'a dyn Reporter,
}

impl<'a> EndpointRunner<'a> {
    pub fn new(probe: &'a dyn Probe, policy: &'a RetryPolicy, reporter: &'a dyn Reporter) -> Self {
        Self {
            probe,
            policy,
            reporter,
        }
    }

    /// Run attempts until a terminal result is reached.
    pub async fn run(&self, spec: Arc<EndpointSpec>) -> EndpointResult {
        let span = tracing::info_span!("endpoint", name = %spec.name, url = %spec.url);
        self.run_attempts(spec).instrument(span).await
    }

    async fn run_attempts(&self, spec: Arc<EndpointSpec>) -> EndpointResult {
        let started = Instant::now();
        let mut attempt_index: u32 = 0;

        tracing::debug!(max_attempts = spec.max_attempts(), "Starting health check");

        loop {
            let attempt_started = Instant::now();
            let outcome = self.probe.probe(&spec).await;
            let attempt_number = attempt_number(attempt_index);

            metrics::record_attempt(&spec.name, &outcome, attempt_started.elapsed());
            self.reporter.record_attempt(&spec.name, attempt_number, &outcome);

            if !self.policy.should_retry(attempt_index, &outcome, spec.retries) {
                let result = EndpointResult::new(spec, outcome, attempt_number, started.elapsed());
                metrics::record_endpoint_result(&result);
                return result;
            }

            let delay = self.policy.delay_after(attempt_index);
            if !delay.is_zero() {
                tracing::debug!(attempt = attempt_number, delay = ?delay, "Waiting before retry");
                tokio::time::sleep(delay).await;
            }
            attempt_index += 1;
        }
    }
}

/// 1-based attempt number for a 0-based index.
fn attempt_number(attempt_index: u32) -> u32 {
    attempt_index.saturating_add(1)
}
