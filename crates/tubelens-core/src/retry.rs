//! Retry policy for data-source calls.
//!
//! Only rate-limit failures are retried. Missing channels, transport
//! failures and malformed upstream responses are propagated on the first
//! attempt.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::source::FetchError;

/// An error that can tell whether the failed call is worth repeating.
pub trait Retriable: Display {
    fn is_retriable(&self) -> bool;
}

impl Retriable for FetchError {
    fn is_retriable(&self) -> bool {
        FetchError::is_retriable(self)
    }
}

/// Bounded retry with a linear backoff schedule.
///
/// Before retry number `n` (1-based) the policy sleeps `n * backoff_base`.
///
/// | Attempt | Sleep before attempt |
/// |---------|----------------------|
/// | initial | none |
/// | retry 1 | 1 × base |
/// | retry 2 | 2 × base |
///
/// The default allows one retry, so a call runs at most twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff_base: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, backoff_base: Duration) -> Self {
        Self {
            max_retries,
            backoff_base,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Upper bound on how many times an operation runs.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay inserted before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(attempt)
    }

    /// Runs `operation`, retrying rate-limit failures per the policy.
    ///
    /// # Errors
    ///
    /// Returns the first non-retriable error, or the last retriable one once
    /// retries are exhausted.
    pub async fn retry<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        E: Retriable,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0u32;

        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if !err.is_retriable() || attempt >= self.max_retries {
                return Err(err);
            }

            attempt += 1;
            let delay = self.delay_for(attempt);
            tracing::warn!(
                attempt,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "rate limited by data source, backing off before retry"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
