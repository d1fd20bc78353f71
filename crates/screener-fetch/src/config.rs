//! Fetch pipeline configuration.

use std::time::Duration;

/// Base URL of the chart-style quote endpoint.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/";

/// Browser user agent sent with quote requests.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration shared by the quote client, retry policy and scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Quote endpoint, the ticker symbol is appended directly.
    pub base_url: String,
    /// Lookups per batch, which is also the in-flight ceiling.
    pub concurrency: usize,
    /// Maximum retry attempts after a failed request.
    pub max_retries: u32,
    /// Delay before the first retry (in milliseconds), doubled on each retry.
    pub base_delay_ms: u64,
    /// Pause between consecutive batches (in milliseconds).
    pub batch_delay_ms: u64,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            concurrency: 20,
            max_retries: 3,
            base_delay_ms: 1_000,
            batch_delay_ms: 500,
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    /// Returns the pause between consecutive batches.
    #[must_use]
    pub const fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Returns the delay before the first retry.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}
