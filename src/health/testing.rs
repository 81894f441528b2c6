//! Scripted probe for driving the runner and engine without a network.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::health::probe::Probe;
use crate::health::types::{AttemptOutcome, EndpointSpec};

/// Returns pre-scripted outcomes per endpoint name.
///
/// Once an endpoint's script runs out, the fallback outcome is returned.
#[derive(Debug)]
pub struct ScriptedProbe {
    scripts: Mutex<HashMap<String, VecDeque<AttemptOutcome>>>,
    latencies: HashMap<String, Duration>,
    calls: Mutex<HashMap<String, u32>>,
    fallback: AttemptOutcome,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl Default for ScriptedProbe {
    fn default() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            latencies: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
            fallback: AttemptOutcome::ConnectionError {
                detail: "unscripted endpoint".to_string(),
            },
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcomes returned for `endpoint`, in order.
    pub fn script(self, endpoint: &str, outcomes: Vec<AttemptOutcome>) -> Self {
        self.scripts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(endpoint.to_string(), outcomes.into());
        self
    }

    /// Outcome once a script is exhausted (or for unscripted endpoints).
    pub fn fallback(mut self, outcome: AttemptOutcome) -> Self {
        self.fallback = outcome;
        self
    }

    /// Simulated time each attempt against `endpoint` takes.
    pub fn latency(mut self, endpoint: &str, latency: Duration) -> Self {
        self.latencies.insert(endpoint.to_string(), latency);
        self
    }

    /// Number of probe calls made for `endpoint`.
    pub fn calls(&self, endpoint: &str) -> u32 {
        self.calls
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Highest number of probe calls observed running at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn next_outcome(&self, endpoint: &str) -> AttemptOutcome {
        self.scripts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl Probe for ScriptedProbe {
    async fn probe(&self, spec: &EndpointSpec) -> AttemptOutcome {
        *self
            .calls
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .entry(spec.name.clone())
            .or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(latency) = self.latencies.get(&spec.name) {
            tokio::time::sleep(*latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.next_outcome(&spec.name)
    }
}
