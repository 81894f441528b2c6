//! Monitor engine: one pass over every configured endpoint.
//!
//! # Responsibilities
//! - Run the endpoint runner for each endpoint
//! - Keep results in configuration order
//! - Hand the finished summary to the reporter
//!
//! # Concurrency
//! With `concurrency = 1` endpoints are probed one after another. With a
//! larger pool, at most `concurrency` runners are in flight; each yields its
//! own result, the pool is joined once and results are put back into
//! configuration order before the summary is built.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::health::probe::Probe;
use crate::health::runner::EndpointRunner;
use crate::health::types::{EndpointResult, EndpointSpec, RunSummary};
use crate::observability::metrics;
use crate::observability::reporter::Reporter;
use crate::resilience::retries::RetryPolicy;

/// Failures of the run as a whole. Unhealthy endpoints are never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no endpoints configured for monitoring")]
    NoEndpoints,
}

pub struct MonitorEngine {
    probe: Arc<dyn Probe>,
    policy: RetryPolicy,
    reporter: Arc<dyn Reporter>,
    concurrency: usize,
}

impl MonitorEngine {
    /// Sequential engine (one endpoint at a time).
    pub fn new(probe: Arc<dyn Probe>, policy: RetryPolicy, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            probe,
            policy,
            reporter,
            concurrency: 1,
        }
    }

    /// Worker pool size; values below 1 are treated as 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probe every endpoint once (with retries) and summarize.
    pub async fn run_all(&self, endpoints: &[Arc<EndpointSpec>]) -> Result<RunSummary, EngineError> {
        if endpoints.is_empty() {
            return Err(EngineError::NoEndpoints);
        }

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("run", %run_id);

        let summary = async {
            tracing::info!(
                endpoints = endpoints.len(),
                concurrency = self.concurrency,
                "Starting health checks"
            );

            let results = if self.concurrency == 1 {
                self.run_sequential(endpoints).await
            } else {
                self.run_pooled(endpoints).await
            };

            RunSummary::from_results(results)
        }
        .instrument(span.clone())
        .await;

        let _entered = span.enter();
        metrics::record_run(&summary);
        self.reporter.record_summary(&summary);
        tracing::info!(
            healthy = summary.healthy_count(),
            total = summary.total(),
            "Health checks completed"
        );

        Ok(summary)
    }

    fn runner(&self) -> EndpointRunner<'_> {
        EndpointRunner::new(self.probe.as_ref(), &self.policy, self.reporter.as_ref())
    }

    async fn run_sequential(&self, endpoints: &[Arc<EndpointSpec>]) -> Vec<EndpointResult> {
        let runner = self.runner();
        let mut results = Vec::with_capacity(endpoints.len());
        for spec in endpoints {
            results.push(runner.run(spec.clone()).await);
        }
        results
    }

    async fn run_pooled(&self, endpoints: &[Arc<EndpointSpec>]) -> Vec<EndpointResult> {
        let runner = self.runner();

        let mut indexed: Vec<(usize, EndpointResult)> = stream::iter(endpoints.iter().cloned().enumerate())
            .map(move |(index, spec)| async move { (index, runner.run(spec).await) })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, result)| result).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::testing::ScriptedProbe;
    use crate::health::types::AttemptOutcome;
    use crate::observability::reporter::{CapturingReporter, ReportEvent};
    use std::time::Duration;
    use url::Url;

    fn spec(name: &str, retries: u32) -> Arc<EndpointSpec> {
        Arc::new(EndpointSpec::new(
            name,
            Url::parse(&format!("https://{}.example", name.to_lowercase())).unwrap(),
            Duration::from_secs(5),
            retries,
        ))
    }

    fn engine(probe: Arc<ScriptedProbe>, reporter: Arc<CapturingReporter>) -> MonitorEngine {
        MonitorEngine::new(probe, RetryPolicy::immediate(), reporter)
    }

    #[tokio::test]
    async fn test_empty_endpoint_list_is_an_error() {
        let probe = Arc::new(ScriptedProbe::new());
        let reporter = Arc::new(CapturingReporter::new());

        let err = engine(probe, reporter.clone()).run_all(&[]).await.unwrap_err();

        assert_eq!(err, EngineError::NoEndpoints);
        assert!(reporter.events().is_empty());
    }

    #[tokio::test]
    async fn test_single_endpoint_success() {
        let probe = Arc::new(ScriptedProbe::new().script("X", vec![AttemptOutcome::Success { status_code: 200 }]));
        let reporter = Arc::new(CapturingReporter::new());

        let summary = engine(probe, reporter.clone()).run_all(&[spec("X", 3)]).await.unwrap();

        assert_eq!(summary.total(), 1);
        assert_eq!(summary.healthy_count(), 1);
        let result = &summary.results()[0];
        assert_eq!(result.name(), "X");
        assert_eq!(result.outcome, AttemptOutcome::Success { status_code: 200 });
        assert_eq!(result.attempts_used, 1);
        assert!(result.healthy);

        assert_eq!(
            reporter.events().last(),
            Some(&ReportEvent::Summary { total: 1, healthy_count: 1 })
        );
    }

    #[tokio::test]
    async fn test_mixed_health() {
        let probe = Arc::new(
            ScriptedProbe::new()
                .script("A", vec![AttemptOutcome::Success { status_code: 200 }])
                .script(
                    "B",
                    vec![
                        AttemptOutcome::UnexpectedStatus { status_code: 500 },
                        AttemptOutcome::UnexpectedStatus { status_code: 500 },
                    ],
                ),
        );
        let reporter = Arc::new(CapturingReporter::new());

        let summary = engine(probe.clone(), reporter)
            .run_all(&[spec("A", 1), spec("B", 1)])
            .await
            .unwrap();

        assert_eq!(summary.total(), 2);
        assert_eq!(summary.healthy_count(), 1);
        assert_eq!(summary.results()[1].attempts_used, 2);
        assert_eq!(
            summary.results()[1].outcome,
            AttemptOutcome::UnexpectedStatus { status_code: 500 }
        );
        assert_eq!(probe.calls("A"), 1);
        assert_eq!(probe.calls("B"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pooled_run_preserves_configuration_order() {
        let probe = Arc::new(
            ScriptedProbe::new()
                .fallback(AttemptOutcome::Success { status_code: 200 })
                .latency("A", Duration::from_millis(300))
                .latency("B", Duration::from_millis(100))
                .latency("C", Duration::from_millis(10)),
        );
        let reporter = Arc::new(CapturingReporter::new());
        let engine = engine(probe.clone(), reporter.clone()).with_concurrency(3);

        let summary = engine
            .run_all(&[spec("A", 0), spec("B", 0), spec("C", 0)])
            .await
            .unwrap();

        let names: Vec<&str> = summary.results().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(summary.healthy_count(), 3);
        assert_eq!(probe.peak_in_flight(), 3);

        // Attempt events arrive in completion order, not configuration order.
        let first_event = reporter.events().into_iter().next();
        assert!(matches!(first_event, Some(ReportEvent::Attempt { ref endpoint, .. }) if endpoint == "C"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pool_size_bounds_in_flight_probes() {
        let mut probe = ScriptedProbe::new().fallback(AttemptOutcome::Timeout);
        let names = ["A", "B", "C", "D", "E"];
        for name in names {
            probe = probe.latency(name, Duration::from_millis(50));
        }
        let probe = Arc::new(probe);
        let reporter = Arc::new(CapturingReporter::new());

        let endpoints: Vec<_> = names.iter().map(|n| spec(n, 1)).collect();
        let summary = engine(probe.clone(), reporter)
            .with_concurrency(2)
            .run_all(&endpoints)
            .await
            .unwrap();

        assert_eq!(summary.total(), 5);
        assert_eq!(summary.healthy_count(), 0);
        assert!(summary.results().iter().all(|r| r.attempts_used == 2));
        assert_eq!(probe.peak_in_flight(), 2);
    }

    #[test]
    fn test_concurrency_floor() {
        let engine = MonitorEngine::new(
            Arc::new(ScriptedProbe::new()),
            RetryPolicy::immediate(),
            Arc::new(CapturingReporter::new()),
        )
        .with_concurrency(0);
        assert_eq!(engine.concurrency(), 1);
    }
}
