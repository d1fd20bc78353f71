//! Instrumented transport double for tests.

use crate::url::ticker_from_url;
use crate::{ChartTransport, FetchConfig, TransportError};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned reply for a symbol.
#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status(u16),
}

/// Transport that answers from a table keyed by lookup symbol, counting
/// calls and tracking the peak number of concurrent requests.
///
/// Symbols without a canned reply get a 404.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    replies: HashMap<String, Reply>,
    latency: Duration,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_body(mut self, symbol: &str, body: String) -> Self {
        self.replies.insert(symbol.to_string(), Reply::Body(body));
        self
    }

    pub(crate) fn with_status(mut self, symbol: &str, status: u16) -> Self {
        self.replies.insert(symbol.to_string(), Reply::Status(status));
        self
    }

    pub(crate) const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls_for(&self, symbol: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|called| called.as_str() == symbol)
            .count()
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChartTransport for MockTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let symbol = ticker_from_url(url).to_string();
        self.calls.lock().unwrap().push(symbol.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.replies.get(&symbol) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(TransportError::Status { status: *status }),
            None => Err(TransportError::Status { status: 404 }),
        }
    }
}

/// Builds a chart body with an optional metadata price and a volume series.
pub(crate) fn chart_body(price: Option<f64>, volumes: &[f64]) -> String {
    json!({
        "chart": {
            "result": [{
                "meta": { "regularMarketPrice": price },
                "indicators": { "quote": [{ "close": [], "volume": volumes }] }
            }],
            "error": null
        }
    })
    .to_string()
}

/// Default configuration with the retry backoff shortened.
pub(crate) fn test_config() -> FetchConfig {
    FetchConfig {
        base_url: "http://quotes.test/chart/".to_string(),
        base_delay_ms: 10,
        batch_delay_ms: 5,
        ..FetchConfig::default()
    }
}
