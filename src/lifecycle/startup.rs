//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging
//! - Build the HTTP probe, reporters and engine
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and nothing is probed
//! - Subsystems initialize in order: config, logging, client, engine

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{load_config_or_default, resolve_endpoints, retry_policy, ConfigError, MonitorConfig};
use crate::health::{EngineError, EndpointSpec, HttpProbe, MonitorEngine, Probe, RunSummary};
use crate::observability::logging::{self, LoggingError};
use crate::observability::reporter::{ConsoleReporter, FanoutReporter, OutputFormat, Reporter, TracingReporter};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Command-line level overrides.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub output: OutputFormat,
    pub concurrency: Option<usize>,
}

/// A fully wired engine plus the endpoints it will check.
pub struct Monitor {
    engine: MonitorEngine,
    endpoints: Vec<Arc<EndpointSpec>>,
}

impl Monitor {
    /// Wire an engine from an already loaded config.
    pub fn from_config(
        config: &MonitorConfig,
        probe: Arc<dyn Probe>,
        reporter: Arc<dyn Reporter>,
        concurrency: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let endpoints = resolve_endpoints(config).map_err(ConfigError::Validation)?;
        let engine = MonitorEngine::new(probe, retry_policy(config), reporter)
            .with_concurrency(concurrency.unwrap_or(config.monitor.concurrency));

        Ok(Self { engine, endpoints })
    }

    pub fn endpoints(&self) -> &[Arc<EndpointSpec>] {
        &self.endpoints
    }

    pub fn engine(&self) -> &MonitorEngine {
        &self.engine
    }

    pub async fn run(&self) -> Result<RunSummary, EngineError> {
        self.engine.run_all(&self.endpoints).await
    }
}

/// Load config, initialize logging and build the monitor.
pub fn bootstrap(options: &StartupOptions) -> Result<Monitor, StartupError> {
    let config = load_config_or_default(options.config_path.as_deref())?;

    logging::init_logging(&config.logging, options.log_level.as_deref())?;

    tracing::info!(
        endpoints = config.endpoints.len(),
        timeout_secs = config.monitor.timeout,
        retries = config.monitor.retries,
        delay_secs = config.monitor.delay,
        "Configuration loaded"
    );

    let probe: Arc<dyn Probe> = Arc::new(HttpProbe::new()?);
    let reporter: Arc<dyn Reporter> = Arc::new(
        FanoutReporter::new()
            .with(Arc::new(TracingReporter))
            .with(Arc::new(ConsoleReporter::new(options.output))),
    );

    Ok(Monitor::from_config(&config, probe, reporter, options.concurrency)?)
}
