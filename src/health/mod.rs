//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! MonitorEngine (engine.rs)
//!     → for each endpoint, in configuration order
//!     → EndpointRunner (runner.rs)
//!         → Probe (probe.rs), one attempt per call
//!         → RetryPolicy decides retry-or-stop
//!     → EndpointResult
//!     → RunSummary
//!     → Reporter
//! ```
//!
//! # Design Decisions
//! - Attempt failures are data (`AttemptOutcome`), never errors
//! - The only engine-level error is an empty endpoint list
//! - Endpoint specs are shared read-only via `Arc`

pub mod engine;
pub mod probe;
pub mod runner;
#[cfg(test)]
pub(crate) mod testing;
pub mod types;

pub use engine::{EngineError, MonitorEngine};
pub use probe::{HttpProbe, Probe};
pub use runner::EndpointRunner;
pub use types::{AttemptOutcome, EndpointResult, EndpointSpec, RunSummary};
