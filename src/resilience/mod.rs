//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Endpoint attempt:
//!     → timeouts.rs (hard deadline per attempt)
//!     → retries.rs (retry or stop)
//!     → backoff.rs (delay before the next attempt, if any)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every attempt has a deadline
//! - Retry eligibility does not distinguish transient from permanent failures
//! - No delay by default; fixed or exponential delay is opt-in

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use backoff::RetryDelay;
pub use retries::{should_retry, RetryPolicy};
