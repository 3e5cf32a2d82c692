//! Retry Mechanism Module
//!
//! Bounded retries with linear backoff. Attempt `n` (0-based) that fails with a
//! retryable error waits `retry_delay * (n + 1)` before attempt `n + 1`.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::RequestConfig;
use crate::error::ApiError;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Base delay for linear backoff
    pub retry_delay: Duration,
    /// Custom retry condition function
    pub retry_condition: Option<fn(&ApiError) -> bool>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RequestConfig::default())
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub const fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
            retry_condition: None,
        }
    }

    /// Policy matching a request configuration
    pub fn from_config(config: &RequestConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay)
    }

    /// Set maximum retries
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set custom retry condition
    pub fn with_retry_condition(mut self, condition: fn(&ApiError) -> bool) -> Self {
        self.retry_condition = Some(condition);
        self
    }

    /// Total attempts this policy allows
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Check if an error should be retried
    pub fn should_retry(&self, error: &ApiError) -> bool {
        match self.retry_condition {
            Some(condition) => condition(error),
            None => error.is_retryable(),
        }
    }

    /// Delay to wait after the failed attempt `attempt` (0-based)
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt.saturating_add(1))
    }
}

/// Retry executor that handles the actual retry logic
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create a new retry executor
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error, or
    /// the retry budget is spent. The closure receives the 0-based attempt index.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, ApiError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;
        loop {
            match operation(attempt).await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if attempt >= self.policy.max_retries || !self.policy.should_retry(&error) {
                        return Err(error);
                    }

                    let delay = self.policy.calculate_delay(attempt);
                    tracing::warn!(
                        target: "vidcast_admin::retry",
                        attempt = attempt + 1,
                        max_attempts = self.policy.max_attempts(),
                        delay_ms = delay.as_millis() as u64,
                        err = %error,
                        "attempt failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn reset() -> ApiError {
        ApiError::network("http://h/api", "connection reset")
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_success_on_second_attempt() {
        let counter = Arc::new(AtomicU32::new(0));
        let executor = RetryExecutor::new(RetryPolicy::new(3, Duration::from_millis(100)));

        let result = executor
            .execute(|_| {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(reset())
                    } else {
                        Ok("success")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "success");
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhaustion_makes_max_retries_plus_one_attempts() {
        let counter = Arc::new(AtomicU32::new(0));
        let executor = RetryExecutor::new(RetryPolicy::new(2, Duration::from_millis(10)));

        let result: Result<(), ApiError> = executor
            .execute(|_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(reset())
                }
            })
            .await;

        assert!(result.unwrap_err().is_network_error());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn http_errors_are_not_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let executor = RetryExecutor::new(RetryPolicy::new(5, Duration::from_millis(10)));

        let result: Result<(), ApiError> = executor
            .execute(|_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::http_status("Server error", 500, "http://h/api"))
                }
            })
            .await;

        assert_eq!(result.unwrap_err().status_code(), Some(500));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_condition_overrides_classification() {
        let counter = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(2, Duration::from_millis(10))
            .with_retry_condition(|e| e.status_code() == Some(503));
        let executor = RetryExecutor::new(policy);

        let _: Result<(), ApiError> = executor
            .execute(|_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::http_status("unavailable", 503, "http://h/api"))
                }
            })
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_delay_calculation_is_linear() {
        let policy = RetryPolicy::new(3, Duration::from_millis(100));
        assert_eq!(policy.calculate_delay(0), Duration::from_millis(100));
        assert_eq!(policy.calculate_delay(1), Duration::from_millis(200));
        assert_eq!(policy.calculate_delay(2), Duration::from_millis(300));
        assert_eq!(policy.max_attempts(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_between_attempts() {
        let start = tokio::time::Instant::now();
        let executor = RetryExecutor::new(RetryPolicy::new(2, Duration::from_millis(100)));
        let _: Result<(), ApiError> = executor.execute(|_| async { Err(reset()) }).await;
        // 100ms after attempt 0, 200ms after attempt 1, none after the last.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(300), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(310), "{elapsed:?}");
    }
}
