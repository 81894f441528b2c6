//! Reporters receive attempt events and run summaries from the engine.
//!
//! The engine never logs on its own; it calls into whichever `Reporter` it
//! was built with. Implementations must be safe to call from concurrent
//! endpoint runners and must not block.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::health::types::{AttemptOutcome, RunSummary};

/// Outward calls made by the monitor engine.
pub trait Reporter: Send + Sync {
    /// One attempt finished. `attempt` is 1-based.
    fn record_attempt(&self, endpoint: &str, attempt: u32, outcome: &AttemptOutcome);

    /// The run finished.
    fn record_summary(&self, summary: &RunSummary);
}

/// Structured log lines via `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn record_attempt(&self, endpoint: &str, attempt: u32, outcome: &AttemptOutcome) {
        match outcome {
            AttemptOutcome::Success { status_code } => {
                tracing::info!(endpoint, attempt, status = status_code, "Health check succeeded");
            }
            AttemptOutcome::UnexpectedStatus { status_code } => {
                tracing::warn!(endpoint, attempt, status = status_code, "Health check failed: unexpected status");
            }
            AttemptOutcome::Timeout => {
                tracing::error!(endpoint, attempt, "Health check failed: timeout");
            }
            AttemptOutcome::ConnectionError { detail } => {
                tracing::error!(endpoint, attempt, error = %detail, "Health check failed: connection error");
            }
        }
    }

    fn record_summary(&self, summary: &RunSummary) {
        if summary.all_healthy() {
            tracing::info!(
                healthy = summary.healthy_count(),
                total = summary.total(),
                "All endpoints are healthy"
            );
            return;
        }

        tracing::warn!(
            healthy = summary.healthy_count(),
            total = summary.total(),
            failed = summary.unhealthy_count(),
            "Some endpoints are unhealthy"
        );
        for result in summary.failed() {
            tracing::warn!(
                endpoint = %result.name(),
                attempts = result.attempts_used,
                outcome = %result.outcome,
                "Endpoint unhealthy"
            );
        }
    }
}

/// Output format for the console summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Human-readable (or JSON) summary on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter {
    format: OutputFormat,
}

impl ConsoleReporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Reporter for ConsoleReporter {
    fn record_attempt(&self, _endpoint: &str, _attempt: u32, _outcome: &AttemptOutcome) {}

    fn record_summary(&self, summary: &RunSummary) {
        let rendered = match self.format {
            OutputFormat::Text => render_text(summary),
            OutputFormat::Json => match serde_json::to_string_pretty(summary) {
                Ok(json) => json + "\n",
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize run summary");
                    return;
                }
            },
        };

        // One locked write so concurrent output cannot interleave.
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(rendered.as_bytes()).and_then(|_| stdout.flush()) {
            tracing::error!(error = %e, "Failed to write summary to stdout");
        }
    }
}

/// Render the plain-text summary block.
pub fn render_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    for result in summary.results() {
        let status = if result.healthy { "OK" } else { "FAILED" };
        out.push_str(&format!(
            "{}: {} - {} after {} attempt{}\n",
            result.name(),
            status,
            result.outcome,
            result.attempts_used,
            if result.attempts_used == 1 { "" } else { "s" },
        ));
    }

    out.push_str(&format!(
        "\nHealth check summary: {}/{} endpoints healthy\n",
        summary.healthy_count(),
        summary.total()
    ));

    if summary.all_healthy() {
        out.push_str("All endpoints are healthy!\n");
    } else {
        out.push_str(&format!("{} endpoints failed:\n", summary.unhealthy_count()));
        for result in summary.failed() {
            out.push_str(&format!("  - {}: {}\n", result.name(), result.outcome));
        }
    }
    out
}

/// Forwards every call to each inner reporter, in order.
#[derive(Default, Clone)]
pub struct FanoutReporter {
    reporters: Vec<Arc<dyn Reporter>>,
}

impl FanoutReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporters.push(reporter);
        self
    }
}

impl Reporter for FanoutReporter {
    fn record_attempt(&self, endpoint: &str, attempt: u32, outcome: &AttemptOutcome) {
        for reporter in &self.reporters {
            reporter.record_attempt(endpoint, attempt, outcome);
        }
    }

    fn record_summary(&self, summary: &RunSummary) {
        for reporter in &self.reporters {
            reporter.record_summary(summary);
        }
    }
}

/// Event captured by `CapturingReporter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Attempt {
        endpoint: String,
        attempt: u32,
        outcome: AttemptOutcome,
    },
    Summary {
        total: usize,
        healthy_count: usize,
    },
}

/// Keeps every event in memory. Meant for tests and embedding.
#[derive(Debug, Default)]
pub struct CapturingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// Attempt events for one endpoint, in emission order.
    pub fn attempts_for(&self, endpoint: &str) -> Vec<(u32, AttemptOutcome)> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Attempt { endpoint: name, attempt, outcome } if name == endpoint => {
                    Some((*attempt, outcome.clone()))
                }
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Reporter for CapturingReporter {
    fn record_attempt(&self, endpoint: &str, attempt: u32, outcome: &AttemptOutcome) {
        self.lock().push(ReportEvent::Attempt {
            endpoint: endpoint.to_string(),
            attempt,
            outcome: outcome.clone(),
        });
    }

    fn record_summary(&self, summary: &RunSummary) {
        self.lock().push(ReportEvent::Summary {
            total: summary.total(),
            healthy_count: summary.healthy_count(),
        });
    }
}
