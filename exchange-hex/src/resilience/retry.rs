//! Bounded retry with exponential backoff.

use std::time::Duration;

/// Retry budget for one wrapped call.
///
/// `max_attempts` counts the initial call, so `max_attempts == 1` means no
/// retry at all. The delay before re-attempt `n + 1` is
/// `base_delay * 2^(n - 1)`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Backoff delay after the given (1-based) failed attempt.
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
        }
    }
}
