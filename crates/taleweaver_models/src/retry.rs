//! Bounded retry for transient provider failures.

use std::future::Future;
use std::time::Duration;
use taleweaver_error::{ProviderResult, RetryableError};
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// How often and how patiently a provider call is retried.
///
/// A call is attempted once and then retried at most `max_retries` times,
/// waiting `backoff` before each retry. Only errors whose
/// [`RetryableError::is_retryable`] is true are retried.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taleweaver_models::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_retries(), 3);
/// assert_eq!(policy.backoff(), Duration::from_secs(2));
/// assert_eq!(policy.max_attempts(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: usize,
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}

impl RetryPolicy {
    /// Create a policy.
    pub fn new(max_retries: usize, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Policy that never retries.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Retries after the first attempt.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Delay before each retry.
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Total attempts including the first.
    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }

    /// Run `action` under this policy.
    ///
    /// `operation` names the call in log output. The last error is returned
    /// once retries are exhausted, and permanent errors are returned at once.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut action: F) -> ProviderResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ProviderResult<T>>,
    {
        let backoff_ms = u64::try_from(self.backoff.as_millis()).unwrap_or(u64::MAX);
        let strategy = FixedInterval::from_millis(backoff_ms).take(self.max_retries);

        Retry::spawn(strategy, || {
            let attempt = action();
            async move {
                match attempt.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(operation, error = %e, "Transient provider error, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        warn!(operation, error = %e, "Permanent provider error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }
}
