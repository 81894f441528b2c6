//! Retry decisions for endpoint attempts.
//!
//! # Design Decisions
//! - `Success` is always terminal
//! - Timeouts, connection errors and unexpected statuses are equally retryable
//! - A spec with `retries = n` gets at most `n + 1` attempts

use std::time::Duration;

use crate::health::types::AttemptOutcome;
use crate::resilience::backoff::RetryDelay;

/// Returns true iff another attempt should follow.
///
/// `attempt_index` is zero-based: the first attempt is index 0.
pub fn should_retry(attempt_index: u32, outcome: &AttemptOutcome, max_retries: u32) -> bool {
    !outcome.is_success() && attempt_index < max_retries
}

/// Retry policy applied by the endpoint runner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    delay: RetryDelay,
}

impl RetryPolicy {
    pub fn new(delay: RetryDelay) -> Self {
        Self { delay }
    }

    /// Back-to-back retries, no delay.
    pub fn immediate() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> RetryDelay {
        self.delay
    }

    pub fn should_retry(&self, attempt_index: u32, outcome: &AttemptOutcome, max_retries: u32) -> bool {
        should_retry(attempt_index, outcome, max_retries)
    }

    /// Wait before the attempt that follows `attempt_index`.
    pub fn delay_after(&self, attempt_index: u32) -> Duration {
        self.delay.before_retry(attempt_index + 1)
    }
}
