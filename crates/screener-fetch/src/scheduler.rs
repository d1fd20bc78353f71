//! Bounded batch scheduling of quote lookups.

use crate::{FetchConfig, QuoteClient};
use futures::future::join_all;
use screener_types::{AttributeKind, AttributeMap, Ticker};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Progress after a batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Attribute being fetched.
    pub kind: AttributeKind,
    /// Tickers processed so far.
    pub processed: usize,
    /// Tickers in this run.
    pub total: usize,
}

impl BatchProgress {
    /// Returns the completed percentage, rounded to the nearest integer.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        ((self.processed as f64 / self.total as f64) * 100.0).round() as u32
    }

    /// Returns true once every ticker has been processed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.processed >= self.total
    }
}

impl std::fmt::Display for BatchProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({}%)", self.processed, self.total, self.percent())
    }
}

/// Callback invoked after each batch.
pub type ProgressObserver = Arc<dyn Fn(BatchProgress) + Send + Sync>;

/// Runs lookups in fixed-size groups.
///
/// Each group's lookups run concurrently and the whole group is awaited
/// before the next one starts, so at most `batch_size` lookups are ever in
/// flight. Groups follow input order and are separated by `batch_delay`.
#[derive(Clone)]
pub struct BatchScheduler {
    client: QuoteClient,
    batch_size: usize,
    batch_delay: Duration,
    observer: Option<ProgressObserver>,
}

impl BatchScheduler {
    /// Creates a scheduler using `config.concurrency` and `config.batch_delay_ms`.
    #[must_use]
    pub fn new(client: QuoteClient, config: &FetchConfig) -> Self {
        Self {
            client,
            batch_size: config.concurrency.max(1),
            batch_delay: config.batch_delay(),
            observer: None,
        }
    }

    /// Sets a callback notified after each batch.
    #[must_use]
    pub fn with_observer(mut self, observer: ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Resolves `kind` for every ticker in `tickers`.
    ///
    /// The returned map has exactly one entry per distinct input ticker.
    pub async fn run(&self, tickers: &[Ticker], kind: AttributeKind) -> AttributeMap {
        let total = tickers.len();
        let mut results = AttributeMap::new();
        let mut processed = 0;

        for group in tickers.chunks(self.batch_size) {
            let lookups = group.iter().map(|ticker| async move {
                let value = self.client.fetch(ticker, kind).await;
                (ticker.clone(), value)
            });
            results.extend(join_all(lookups).await);

            processed += group.len();
            let progress = BatchProgress {
                kind,
                processed,
                total,
            };
            info!("Progress: {progress}");
            if let Some(observer) = &self.observer {
                observer(progress);
            }

            if processed < total {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        results
    }
}

impl std::fmt::Debug for BatchScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchScheduler")
            .field("client", &self.client)
            .field("batch_size", &self.batch_size)
            .field("batch_delay", &self.batch_delay)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, chart_body, test_config};
    use std::sync::Mutex;
    use tokio::time::Instant;

    fn tickers(count: usize) -> Vec<Ticker> {
        (0..count)
            .map(|i| format!("T{i}").parse().unwrap())
            .collect()
    }

    fn transport_for(tickers: &[Ticker]) -> MockTransport {
        tickers
            .iter()
            .fold(MockTransport::new(), |transport, ticker| {
                transport.with_body(ticker.as_str(), chart_body(Some(10.0), &[100.0]))
            })
            .with_latency(Duration::from_millis(50))
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_bounded() {
        let input = tickers(45);
        let transport = Arc::new(transport_for(&input));
        let config = FetchConfig {
            concurrency: 20,
            ..test_config()
        };
        let scheduler = BatchScheduler::new(QuoteClient::new(transport.clone(), &config), &config);

        let results = scheduler.run(&input, AttributeKind::Price).await;

        assert_eq!(results.len(), 45);
        assert_eq!(transport.total_calls(), 45);
        assert!(transport.peak_in_flight() <= 20);
        // A full group really does run concurrently
        assert_eq!(transport.peak_in_flight(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_reported_per_batch() {
        let input = tickers(5);
        let transport = Arc::new(transport_for(&input));
        let config = FetchConfig {
            concurrency: 2,
            ..test_config()
        };
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let scheduler = BatchScheduler::new(QuoteClient::new(transport, &config), &config)
            .with_observer(Arc::new(move |progress| sink.lock().unwrap().push(progress)));

        scheduler.run(&input, AttributeKind::AverageVolume).await;

        let seen = seen.lock().unwrap();
        let processed: Vec<usize> = seen.iter().map(|p| p.processed).collect();
        assert_eq!(processed, vec![2, 4, 5]);
        assert!(seen.iter().all(|p| p.total == 5));
        assert_eq!(seen[0].percent(), 40);
        assert!(seen[2].is_done());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_between_batches_only() {
        let input = tickers(3);
        let transport = Arc::new(MockTransport::new());
        let config = FetchConfig {
            concurrency: 1,
            max_retries: 0,
            batch_delay_ms: 500,
            ..test_config()
        };
        let scheduler = BatchScheduler::new(QuoteClient::new(transport, &config), &config);

        let start = Instant::now();
        scheduler.run(&input, AttributeKind::Price).await;
        let elapsed = start.elapsed();

        // Two pauses for three single-ticker batches
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_abort_group() {
        let input: Vec<Ticker> = ["GOOD", "BAD"].iter().map(|s| s.parse().unwrap()).collect();
        let transport = Arc::new(
            MockTransport::new()
                .with_body("GOOD", chart_body(Some(42.0), &[1.0]))
                .with_status("BAD", 500),
        );
        let config = test_config();
        let scheduler = BatchScheduler::new(QuoteClient::new(transport, &config), &config);

        let results = scheduler.run(&input, AttributeKind::Price).await;

        assert_eq!(results.get(&input[0]), Some(&42.0));
        assert_eq!(results.get(&input[1]), Some(&0.0));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let config = test_config();
        let scheduler =
            BatchScheduler::new(QuoteClient::new(Arc::new(MockTransport::new()), &config), &config);

        assert!(scheduler.run(&[], AttributeKind::Price).await.is_empty());
    }

    #[test]
    fn test_progress_display() {
        let progress = BatchProgress {
            kind: AttributeKind::Price,
            processed: 20,
            total: 30,
        };
        assert_eq!(progress.to_string(), "20/30 (67%)");
    }
}
