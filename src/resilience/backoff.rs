//! Delay between retry attempts.

use std::time::Duration;
use rand::Rng;

/// How long to wait before issuing a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryDelay {
    /// Retries are issued back-to-back.
    #[default]
    None,
    /// Same delay before every retry.
    Fixed(Duration),
    /// Exponential growth from `base`, capped at `max`, with jitter.
    Exponential { base: Duration, max: Duration },
}

impl RetryDelay {
    /// Delay before retry number `retry` (1 for the first retry).
    pub fn before_retry(&self, retry: u32) -> Duration {
        match *self {
            RetryDelay::None => Duration::ZERO,
            RetryDelay::Fixed(delay) => delay,
            RetryDelay::Exponential { base, max } => calculate_backoff(retry, base, max),
        }
    }
}

/// Calculate exponential backoff delay with jitter.
pub fn calculate_backoff(attempt: u32, base: Duration, max: Duration) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let capped_delay = 2u32
        .checked_pow(attempt - 1)
        .and_then(|factor| base.checked_mul(factor))
        .map_or(max, |delay| delay.min(max));

    // Jitter: 0 to 10% of the delay
    let jitter_range = u64::try_from((capped_delay / 10).as_nanos()).unwrap_or(u64::MAX);
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    capped_delay.saturating_add(Duration::from_nanos(jitter))
}
