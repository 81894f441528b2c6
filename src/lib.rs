//! Endpoint Health Monitor Library
//!
//! Probes a configured set of HTTP(S) endpoints once, retrying each within
//! its own retry allowance, and summarizes which endpoints are healthy.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::schema::MonitorConfig;
pub use health::{AttemptOutcome, EndpointResult, EndpointSpec, MonitorEngine, RunSummary};
pub use observability::reporter::Reporter;
