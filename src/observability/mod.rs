//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint runner / monitor engine produce:
//!     → reporter.rs (attempt events, run summary)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Reporters render to:
//!     → logging.rs subscriber (stderr or log file, pretty or JSON)
//!     → stdout summary (text or JSON)
//! ```
//!
//! # Design Decisions
//! - The engine talks to an injected `Reporter`, never to a global logger
//! - Structured fields (endpoint, attempt, status) on every event
//! - Each run carries a UUID run id on its span

pub mod logging;
pub mod metrics;
pub mod reporter;

pub use reporter::{CapturingReporter, ConsoleReporter, FanoutReporter, OutputFormat, Reporter, TracingReporter};
