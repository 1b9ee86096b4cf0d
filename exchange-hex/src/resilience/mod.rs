//! Resilience envelope around upstream gateway calls.
//!
//! Three independent policies composed in fixed order: rate limiter (admission
//! may suspend the calling task) → retry (bounded re-attempts with backoff,
//! transient failures only) → circuit breaker (short-circuits once the rolling
//! failure rate crosses a threshold, probes again after a cooldown).
//!
//! Conversions go through the full chain via [`ResilienceEnvelope::call`].
//! History searches and catalog listings only pass the rate limiter via
//! [`ResilienceEnvelope::acquire`] - a degraded read is tolerable, a partial
//! write is not.

mod circuit_breaker;
mod retry;

pub use circuit_breaker::{BreakerState, CircuitBreaker, CircuitBreakerConfig};
pub use retry::RetryPolicy;

use std::future::Future;
use std::num::NonZeroU32;
use std::time::Duration;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};

use exchange_types::GatewayError;

/// Error produced by the envelope when the wrapped call cannot succeed.
///
/// Every variant carries (or is) the originating cause, so callers can attach
/// it to their own failure without losing the trail.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("Circuit breaker is open")]
    CircuitOpen,

    #[error("Retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        cause: GatewayError,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Tuning knobs for the envelope.
#[derive(Debug, Clone)]
pub struct EnvelopeConfig {
    /// Calls admitted per period (token bucket burst size).
    pub requests_per_period: u32,
    /// Token replenishment period.
    pub period: Duration,
    pub retry: RetryPolicy,
    pub breaker: CircuitBreakerConfig,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            requests_per_period: 100,
            period: Duration::from_secs(60),
            retry: RetryPolicy::default(),
            breaker: CircuitBreakerConfig::default(),
        }
    }
}

/// Process-wide resilience state. Created once at startup and shared by every
/// request; all internal state is safe for concurrent access.
pub struct ResilienceEnvelope {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    retry: RetryPolicy,
    breaker: CircuitBreaker,
}

impl ResilienceEnvelope {
    pub fn new(config: EnvelopeConfig) -> Self {
        let quota = Quota::with_period(config.period)
            .unwrap_or_else(|| Quota::per_minute(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::new(config.requests_per_period.max(1)).unwrap_or(NonZeroU32::MIN));

        Self {
            limiter: RateLimiter::direct(quota),
            retry: config.retry,
            breaker: CircuitBreaker::new(config.breaker),
        }
    }

    /// Waits until the rate limiter admits one call. Used on its own by the
    /// read paths.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }

    /// Runs `op` through the full policy chain.
    ///
    /// Only transient failures are retried; each attempt's outcome feeds the
    /// circuit breaker. Once the breaker opens, calls fail fast with
    /// [`EnvelopeError::CircuitOpen`] until the cooldown elapses.
    pub async fn call<T, F, Fut>(&self, op: F) -> Result<T, EnvelopeError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        self.limiter.until_ready().await;

        if !self.breaker.try_acquire() {
            return Err(EnvelopeError::CircuitOpen);
        }

        let mut attempt = 1u32;
        loop {
            match op().await {
                Ok(value) => {
                    self.breaker.record_success();
                    return Ok(value);
                }
                Err(err) => {
                    self.breaker.record_failure();

                    if !err.is_transient() {
                        return Err(EnvelopeError::Gateway(err));
                    }
                    if attempt >= self.retry.max_attempts {
                        return Err(EnvelopeError::RetriesExhausted {
                            attempts: attempt,
                            cause: err,
                        });
                    }

                    tracing::warn!(attempt, error = %err, "Upstream call failed, retrying");
                    tokio::time::sleep(self.retry.delay(attempt)).await;

                    // The breaker may have opened while this task slept.
                    if !self.breaker.try_acquire() {
                        return Err(EnvelopeError::CircuitOpen);
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// Current breaker state, exposed for observability.
    pub fn breaker_state(&self) -> BreakerState {
        self.breaker.state()
    }
}

impl Default for ResilienceEnvelope {
    fn default() -> Self {
        Self::new(EnvelopeConfig::default())
    }
}
