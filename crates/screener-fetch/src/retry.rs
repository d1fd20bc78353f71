//! Bounded exponential-backoff retry.

use crate::FetchConfig;
use crate::url::ticker_from_url;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Retry policy wrapped around a single remote call.
///
/// A failed call is retried up to `max_retries` times, waiting
/// `base_delay * 2^(n - 1)` before the n-th retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a retry policy.
    #[must_use]
    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Creates the policy described by `config`.
    #[must_use]
    pub const fn from_config(config: &FetchConfig) -> Self {
        Self::new(config.max_retries, config.base_delay())
    }

    /// Returns the delay before the given retry (1-based).
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Runs `op`, retrying on error.
    ///
    /// `target` is the request URL and is only used for logging. Every
    /// failure and every retry is logged.
    ///
    /// # Errors
    ///
    /// Returns the last error once all retries are exhausted.
    pub async fn run<T, E, F, Fut>(&self, target: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut retries = 0;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "Request failed for ticker: {}, Error: {e}",
                        ticker_from_url(target)
                    );

                    if retries >= self.max_retries {
                        return Err(e);
                    }

                    retries += 1;
                    let delay = self.delay_for(retries);
                    info!(
                        "Retrying request ({retries}/{}) after {}ms delay...",
                        self.max_retries,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}
