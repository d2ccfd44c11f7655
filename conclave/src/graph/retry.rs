//! Retry policy for worker calls.
//!
//! A worker's external call (LLM, tool, sub-team) is retried a bounded number of times on
//! non-fatal errors before the failure is reported. Fatal routing errors are never retried.

use std::future::Future;
use std::time::Duration;

use crate::error::AgentError;

/// Delay strategy between attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// Constant delay between attempts.
    Fixed(Duration),
    /// Delay grows by `multiplier` per attempt, capped at `max`.
    Exponential {
        initial: Duration,
        max: Duration,
        multiplier: f64,
    },
}

/// How often and how fast to retry a failed worker call.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; `0` means a single attempt.
    pub max_retries: usize,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Single attempt, no retry.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Backoff::Fixed(Duration::ZERO),
        }
    }

    pub fn fixed(max_retries: usize, interval: Duration) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed(interval),
        }
    }

    /// A `multiplier` below `1.0` or not finite is treated as `1.0`.
    pub fn exponential(
        max_retries: usize,
        initial: Duration,
        max: Duration,
        multiplier: f64,
    ) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier >= 1.0 {
            multiplier
        } else {
            1.0
        };
        Self {
            max_retries,
            backoff: Backoff::Exponential {
                initial,
                max,
                multiplier,
            },
        }
    }

    /// True when another attempt is allowed after `retry` retries already made.
    pub fn should_retry(&self, retry: usize) -> bool {
        retry < self.max_retries
    }

    /// Delay before retry number `retry` (0-based). Never exceeds `max` for exponential backoff.
    pub fn delay(&self, retry: usize) -> Duration {
        match &self.backoff {
            Backoff::Fixed(d) => *d,
            Backoff::Exponential {
                initial,
                max,
                multiplier,
            } => {
                let exp = i32::try_from(retry).unwrap_or(i32::MAX);
                let secs = initial.as_secs_f64() * multiplier.powi(exp);
                if !secs.is_finite() {
                    return *max;
                }
                Duration::try_from_secs_f64(secs.max(0.0))
                    .unwrap_or(*max)
                    .min(*max)
            }
        }
    }

    /// Runs `call` until it succeeds, fails fatally, or retries are exhausted.
    /// Returns the last error in the latter two cases.
    pub async fn run<T, F, Fut>(&self, worker: &str, mut call: F) -> Result<T, AgentError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AgentError>>,
    {
        let mut retry = 0;
        loop {
            match call().await {
                Ok(v) => return Ok(v),
                Err(e) if e.is_fatal() || !self.should_retry(retry) => return Err(e),
                Err(e) => {
                    let delay = self.delay(retry);
                    tracing::warn!(
                        worker = worker,
                        retry = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Worker call failed, retrying"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    retry += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}
