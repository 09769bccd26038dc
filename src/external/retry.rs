//! Caller-side retry for fetches that failed transiently

use std::future::Future;
use std::time::Duration;

use backon::{ConstantBuilder, Retryable};

use super::error::FetchError;
use crate::config::RetryConfig;

/// Fixed-delay retry applied around single fetches.
///
/// Only [`FetchError::is_retryable`] failures (rate limits and timeouts) are
/// retried; everything else is returned after the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// Policy that performs exactly one attempt
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    pub async fn run<T, F, Fut>(&self, operation: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let retries = self.max_attempts.saturating_sub(1) as usize;
        let backoff = ConstantBuilder::default()
            .with_delay(self.delay)
            .with_max_times(retries);

        operation
            .retry(backoff)
            .sleep(tokio::time::sleep)
            .when(FetchError::is_retryable)
            .notify(|err: &FetchError, delay: Duration| {
                tracing::warn!(error = %err, ?delay, "Retrying request");
            })
            .await
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}
