//! Rolling-window circuit breaker.
//!
//! Outcomes of recent calls are kept in a bounded window. When the failure
//! rate over a sufficiently-populated window crosses the threshold the breaker
//! opens and rejects calls until the cooldown elapses, then half-opens to let
//! probe calls through: one success closes it again, one failure re-opens it.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Failure rate in `[0, 1]` at which the breaker opens.
    pub failure_rate_threshold: f64,
    /// Minimum recorded calls before the rate is evaluated at all.
    pub min_calls: usize,
    /// Number of recent outcomes kept in the rolling window.
    pub window_size: usize,
    /// How long the breaker stays open before half-opening.
    pub cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_rate_threshold: 0.5,
            min_calls: 10,
            window_size: 20,
            cooldown: Duration::from_secs(30),
        }
    }
}

struct Inner {
    state: BreakerState,
    /// `true` = success, `false` = failure; newest at the back.
    window: VecDeque<bool>,
    opened_at: Option<Instant>,
}

pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(Inner {
                state: BreakerState::Closed,
                window: VecDeque::new(),
                opened_at: None,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether a call may proceed right now. An open breaker transitions to
    /// half-open once the cooldown has elapsed, admitting the probe call.
    pub fn try_acquire(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            BreakerState::Closed | BreakerState::HalfOpen => true,
            BreakerState::Open => {
                let cooled_down = inner
                    .opened_at
                    .map(|at| at.elapsed() >= self.config.cooldown)
                    .unwrap_or(true);
                if cooled_down {
                    tracing::info!("Circuit breaker half-open, probing upstream");
                    inner.state = BreakerState::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self) {
        let mut inner = self.lock();
        if inner.state == BreakerState::HalfOpen {
            tracing::info!("Circuit breaker closed after successful probe");
            inner.state = BreakerState::Closed;
            inner.window.clear();
            inner.opened_at = None;
        } else {
            self.push_outcome(&mut inner, true);
        }
    }

    pub fn record_failure(&self) {
        let mut inner = self.lock();
        if inner.state == BreakerState::HalfOpen {
            self.open(&mut inner);
            return;
        }

        self.push_outcome(&mut inner, false);

        if inner.window.len() >= self.config.min_calls {
            let failures = inner.window.iter().filter(|ok| !**ok).count();
            let rate = failures as f64 / inner.window.len() as f64;
            if rate >= self.config.failure_rate_threshold {
                self.open(&mut inner);
            }
        }
    }

    pub fn state(&self) -> BreakerState {
        self.lock().state
    }

    fn push_outcome(&self, inner: &mut Inner, ok: bool) {
        inner.window.push_back(ok);
        while inner.window.len() > self.config.window_size {
            inner.window.pop_front();
        }
    }

    fn open(&self, inner: &mut Inner) {
        tracing::warn!("Circuit breaker opened");
        inner.state = BreakerState::Open;
        inner.opened_at = Some(Instant::now());
        inner.window.clear();
    }
}
