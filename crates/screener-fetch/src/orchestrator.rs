//! Cache-aware resolution of ticker attributes.

use crate::{BatchScheduler, FetchConfig, QuoteClient};
use screener_cache::CacheStore;
use screener_types::{AttributeKind, AttributeMap, AttributeValue, NO_DATA, Ticker};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{error, info};

/// How the orchestrator treats persisted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CachePolicy {
    /// Fetch only tickers missing from the cache.
    #[default]
    Use,
    /// Answer from the cache alone, without any network calls.
    ///
    /// Tickers absent from the cache have no entry in the result.
    CacheOnly,
    /// Re-fetch every requested ticker and overwrite its cached value.
    Refresh,
}

/// Resolved attribute maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    /// Ticker to price.
    pub prices: AttributeMap,
    /// Ticker to average volume.
    pub volumes: AttributeMap,
}

impl Resolved {
    /// Returns a ticker's price, or [`NO_DATA`] if it has none.
    #[must_use]
    pub fn price(&self, ticker: &Ticker) -> AttributeValue {
        self.prices.get(ticker).copied().unwrap_or(NO_DATA)
    }

    /// Returns a ticker's average volume, or [`NO_DATA`] if it has none.
    #[must_use]
    pub fn volume(&self, ticker: &Ticker) -> AttributeValue {
        self.volumes.get(ticker).copied().unwrap_or(NO_DATA)
    }
}

/// Splits tickers into cache hits and misses, fetches the misses and
/// persists the merged result.
#[derive(Debug, Clone)]
pub struct FetchOrchestrator {
    cache: CacheStore,
    scheduler: BatchScheduler,
}

impl FetchOrchestrator {
    /// Creates an orchestrator from its parts.
    #[must_use]
    pub const fn new(cache: CacheStore, scheduler: BatchScheduler) -> Self {
        Self { cache, scheduler }
    }

    /// Creates an orchestrator fetching over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn http(cache: CacheStore, config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = QuoteClient::http(config)?;
        Ok(Self::new(cache, BatchScheduler::new(client, config)))
    }

    /// Returns the cache store.
    #[must_use]
    pub const fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Resolves price and average volume for `tickers`.
    ///
    /// Kinds are resolved one after the other, price first. Except under
    /// [`CachePolicy::CacheOnly`], every requested ticker has an entry in
    /// both returned maps. The maps also carry every other cached entry.
    pub async fn resolve(&self, tickers: &[Ticker], policy: CachePolicy) -> Resolved {
        let started = Instant::now();
        let prices = self.cache.load(AttributeKind::Price);
        let volumes = self.cache.load(AttributeKind::AverageVolume);

        if policy == CachePolicy::CacheOnly {
            info!("Using cached data only, no quotes will be fetched");
            return Resolved { prices, volumes };
        }

        let prices = self
            .resolve_kind(tickers, AttributeKind::Price, prices, policy)
            .await;
        let volumes = self
            .resolve_kind(tickers, AttributeKind::AverageVolume, volumes, policy)
            .await;

        info!("Data fetching: {:.2?}", started.elapsed());
        Resolved { prices, volumes }
    }

    async fn resolve_kind(
        &self,
        tickers: &[Ticker],
        kind: AttributeKind,
        mut cached: AttributeMap,
        policy: CachePolicy,
    ) -> AttributeMap {
        let mut seen = HashSet::new();
        let missing: Vec<Ticker> = tickers
            .iter()
            .filter(|ticker| policy == CachePolicy::Refresh || !cached.contains_key(*ticker))
            .filter(|ticker| seen.insert(*ticker))
            .cloned()
            .collect();

        info!("Need to fetch {kind} data for {} tickers", missing.len());
        if missing.is_empty() {
            return cached;
        }

        info!("Fetching {kind} data...");
        let fetched = self.scheduler.run(&missing, kind).await;
        let count = fetched.len();
        cached.extend(fetched);

        if let Err(e) = self.cache.save(kind, &cached) {
            error!("Error saving {kind} cache: {e}");
        }

        info!("Fetched {kind} data for {count} tickers");
        cached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, chart_body, test_config};
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn ticker(symbol: &str) -> Ticker {
        symbol.parse().unwrap()
    }

    fn orchestrator(dir: &TempDir, transport: Arc<MockTransport>) -> FetchOrchestrator {
        let config = test_config();
        let scheduler = BatchScheduler::new(QuoteClient::new(transport, &config), &config);
        FetchOrchestrator::new(CacheStore::new(dir.path()), scheduler)
    }

    fn aapl_and_missing() -> MockTransport {
        MockTransport::new()
            .with_body("AAPL", chart_body(Some(150.0), &[5_000_000.0, 5_000_000.0]))
            .with_status("ZZZZ", 404)
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_then_idempotent() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(aapl_and_missing());
        let orchestrator = orchestrator(&dir, transport.clone());
        let input = vec![ticker("AAPL"), ticker("ZZZZ")];

        let first = orchestrator.resolve(&input, CachePolicy::Use).await;

        assert_relative_eq!(first.price(&input[0]), 150.0);
        assert_eq!(first.prices.get(&input[1]), Some(&NO_DATA));
        assert_relative_eq!(first.volume(&input[0]), 5_000_000.0);
        assert_eq!(first.volumes.get(&input[1]), Some(&NO_DATA));

        // Both kinds persisted
        let cache = orchestrator.cache();
        assert_eq!(cache.load(AttributeKind::Price), first.prices);
        assert_eq!(cache.load(AttributeKind::AverageVolume), first.volumes);

        let calls_after_first = transport.total_calls();
        // AAPL once per kind, ZZZZ 1 + 3 retries per kind
        assert_eq!(calls_after_first, 2 + 8);

        let second = orchestrator.resolve(&input, CachePolicy::Use).await;
        assert_eq!(transport.total_calls(), calls_after_first);
        assert_eq!(second, first);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_tickers_are_not_fetched() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut prices = AttributeMap::new();
        prices.insert(ticker("AAPL"), 99.0);
        store.save(AttributeKind::Price, &prices).unwrap();

        let transport = Arc::new(aapl_and_missing());
        let orchestrator = orchestrator(&dir, transport.clone());

        let resolved = orchestrator.resolve(&[ticker("AAPL")], CachePolicy::Use).await;

        // Cached price wins over what the service would return
        assert_relative_eq!(resolved.price(&ticker("AAPL")), 99.0);
        // Only the volume lookup went out
        assert_eq!(transport.calls_for("AAPL"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_only_allows_partial_coverage() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut prices = AttributeMap::new();
        prices.insert(ticker("AAPL"), 150.0);
        store.save(AttributeKind::Price, &prices).unwrap();

        let transport = Arc::new(aapl_and_missing());
        let orchestrator = orchestrator(&dir, transport.clone());

        let resolved = orchestrator
            .resolve(&[ticker("AAPL"), ticker("ZZZZ")], CachePolicy::CacheOnly)
            .await;

        assert_eq!(resolved.prices.get(&ticker("AAPL")), Some(&150.0));
        assert!(!resolved.prices.contains_key(&ticker("ZZZZ")));
        assert!(resolved.volumes.is_empty());
        assert_eq!(transport.total_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_refetches_cached() {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        let mut prices = AttributeMap::new();
        prices.insert(ticker("AAPL"), 1.0);
        prices.insert(ticker("MSFT"), 400.0);
        store.save(AttributeKind::Price, &prices).unwrap();

        let transport = Arc::new(aapl_and_missing());
        let orchestrator = orchestrator(&dir, transport.clone());

        let resolved = orchestrator.resolve(&[ticker("AAPL")], CachePolicy::Refresh).await;

        assert_relative_eq!(resolved.price(&ticker("AAPL")), 150.0);
        // Unrequested entries survive the merge
        assert_relative_eq!(resolved.price(&ticker("MSFT")), 400.0);
        assert_relative_eq!(store.load(AttributeKind::Price)[&ticker("AAPL")], 150.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicates_fetched_once() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(aapl_and_missing());
        let orchestrator = orchestrator(&dir, transport.clone());

        orchestrator
            .resolve(&[ticker("AAPL"), ticker("AAPL")], CachePolicy::Use)
            .await;

        assert_eq!(transport.calls_for("AAPL"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_qualified_ticker_keyed_by_original() {
        let dir = TempDir::new().unwrap();
        let transport = Arc::new(
            MockTransport::new().with_body("ABC", chart_body(Some(12.0), &[300.0])),
        );
        let orchestrator = orchestrator(&dir, transport.clone());

        let warrant = ticker("ABC/W");
        let first = orchestrator.resolve(&[warrant.clone()], CachePolicy::Use).await;
        assert_relative_eq!(first.price(&warrant), 12.0);
        assert!(!first.prices.contains_key(&ticker("ABC")));

        // The original spelling is what gets cached, so the next run is a hit
        orchestrator.resolve(&[warrant], CachePolicy::Use).await;
        assert_eq!(transport.calls_for("ABC"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cache_write_keeps_full_coverage() {
        let dir = TempDir::new().unwrap();
        // A regular file where the cache directory should be
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();

        let transport = Arc::new(aapl_and_missing());
        let config = test_config();
        let scheduler = BatchScheduler::new(QuoteClient::new(transport.clone(), &config), &config);
        let orchestrator = FetchOrchestrator::new(CacheStore::new(&blocker), scheduler);
        let input = vec![ticker("AAPL"), ticker("ZZZZ")];

        let resolved = orchestrator.resolve(&input, CachePolicy::Use).await;

        for t in &input {
            assert!(resolved.prices.contains_key(t));
            assert!(resolved.volumes.contains_key(t));
        }
        assert_relative_eq!(resolved.price(&input[0]), 150.0);
        assert_eq!(resolved.volume(&input[1]), NO_DATA);
        assert!(!orchestrator.cache().path(AttributeKind::Price).exists());
    }
}
