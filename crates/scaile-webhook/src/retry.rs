//! Bounded retry with a fixed delay between attempts.
//!
//! Every failed attempt, including one that exceeds the per-attempt timeout,
//! is followed by a pause of [`RetryPolicy::retry_delay`] until
//! [`RetryPolicy::max_attempts`] attempts have been made.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind, Result, TRACING_TARGET_RETRY};

/// Default number of attempts, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between consecutive attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Default upper bound on a single attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry policy for event dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    pub max_attempts: u32,

    /// Delay between a failed attempt and the next one.
    pub retry_delay: Duration,

    /// Maximum duration of a single attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

/// Progress of a retried operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetryState {
    /// Attempt with the given 1-based number is in flight.
    Attempting(u32),
    /// An attempt succeeded.
    Succeeded,
    /// Every permitted attempt failed.
    FailedPermanently,
}

impl RetryState {
    /// State before the first attempt.
    pub const fn initial() -> Self {
        Self::Attempting(1)
    }

    /// Returns whether no further transitions are possible.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Attempting(_))
    }

    /// Advances the state after an attempt finished.
    ///
    /// Terminal states are returned unchanged.
    pub const fn advance(self, succeeded: bool, max_attempts: u32) -> Self {
        match self {
            Self::Attempting(_) if succeeded => Self::Succeeded,
            Self::Attempting(attempt) if attempt < max_attempts => Self::Attempting(attempt + 1),
            Self::Attempting(_) => Self::FailedPermanently,
            terminal => terminal,
        }
    }
}

/// Value produced by a successful retried operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempted<T> {
    /// Value returned by the successful attempt.
    pub value: T,
    /// Number of attempts made, including the successful one.
    pub attempts: u32,
}

impl RetryPolicy {
    /// Creates a new policy.
    pub const fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts,
            retry_delay,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Sets the per-attempt timeout.
    pub const fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Checks that the policy permits at least one bounded attempt.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::configuration()
                .with_message("Maximum attempts must be at least 1")
                .with_context("max_attempts"));
        }

        if self.attempt_timeout.is_zero() {
            return Err(Error::configuration()
                .with_message("Attempt timeout must be greater than zero")
                .with_context("attempt_timeout"));
        }

        Ok(())
    }

    /// Returns the longest time a delivery can spend in dispatch.
    pub fn max_duration(&self) -> Duration {
        let attempts = self.max_attempts.max(1);
        self.attempt_timeout
            .saturating_mul(attempts)
            .saturating_add(self.retry_delay.saturating_mul(attempts - 1))
    }

    /// Runs `operation` until it succeeds or the attempts are exhausted.
    ///
    /// The closure receives the 1-based attempt number. Once the last attempt
    /// fails a [`ErrorKind::DispatchExhausted`] error is returned with the
    /// final failure as its source.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<Attempted<T>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut state = RetryState::initial();
        let mut last_error = None;

        while let RetryState::Attempting(attempt) = state {
            let result = tokio::time::timeout(self.attempt_timeout, operation(attempt))
                .await
                .unwrap_or_else(|elapsed| Err(Error::from(elapsed)));

            let error = match result {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(
                            target: TRACING_TARGET_RETRY,
                            attempt,
                            "Attempt succeeded after retry"
                        );
                    }
                    return Ok(Attempted {
                        value,
                        attempts: attempt,
                    });
                }
                Err(error) => error,
            };

            state = state.advance(false, max_attempts);
            if let RetryState::Attempting(next_attempt) = state {
                tracing::warn!(
                    target: TRACING_TARGET_RETRY,
                    attempt,
                    next_attempt,
                    max_attempts,
                    delay_ms = self.retry_delay.as_millis(),
                    error = %error,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(self.retry_delay).await;
            } else {
                tracing::error!(
                    target: TRACING_TARGET_RETRY,
                    attempt,
                    max_attempts,
                    error = %error,
                    "Final attempt failed"
                );
            }

            last_error = Some(error);
        }

        let error = Error::new(ErrorKind::DispatchExhausted)
            .with_message(format!("Failed after {max_attempts} attempts"));

        Err(match last_error {
            Some(source) => error.with_source(source),
            None => error,
        })
    }
}
