//! Endpoint Health Monitor (v1)
//!
//! One pass over every configured endpoint, then exit.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.toml ──▶ config (load, validate, resolve defaults)
//!                        │
//!                        ▼
//!   ┌──────────────────────────────────────────────────────┐
//!   │                   MonitorEngine                      │
//!   │                                                      │
//!   │   for each endpoint (sequential or worker pool)      │
//!   │     EndpointRunner                                   │
//!   │       ├─▶ Probe (one HTTP attempt, hard deadline)    │
//!   │       └─▶ RetryPolicy (retry or stop)                │
//!   │                                                      │
//!   │   RunSummary (configuration order)                   │
//!   └──────────────┬───────────────────────────────────────┘
//!                  │ record_attempt / record_summary
//!                  ▼
//!            Reporter (tracing log lines + stdout summary)
//! ```
//!
//! # Exit Codes
//! - 0: every endpoint healthy
//! - 1: at least one endpoint unhealthy
//! - 2: configuration or startup error
//! - 130: interrupted

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use health_monitor::lifecycle::exit::{exit_code, EXIT_ERROR, EXIT_INTERRUPTED};
use health_monitor::lifecycle::{self, signals, StartupOptions};
use health_monitor::observability::OutputFormat;

#[derive(Parser)]
#[command(name = "health-monitor")]
#[command(about = "Check endpoint availability and report a health summary", long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: config/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overrides `logging.level`
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Endpoints probed at once, overrides `monitor.concurrency`
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    concurrency: Option<u64>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = StartupOptions {
        config_path: cli.config,
        log_level: cli.log_level,
        output: if cli.json { OutputFormat::Json } else { OutputFormat::Text },
        concurrency: cli.concurrency.map(|n| n as usize),
    };

    let monitor = match lifecycle::bootstrap(&options) {
        Ok(monitor) => monitor,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    tracing::info!("health-monitor v{} starting", env!("CARGO_PKG_VERSION"));

    let summary = tokio::select! {
        result = monitor.run() => result,
        _ = signals::interrupted() => {
            tracing::warn!("Interrupted, abandoning run");
            return ExitCode::from(EXIT_INTERRUPTED);
        }
    };

    if let Err(e) = &summary {
        tracing::error!(error = %e, "Run aborted");
        eprintln!("ERROR: {}", e);
    }
    ExitCode::from(exit_code(&summary))
}
