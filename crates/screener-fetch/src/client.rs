//! Quote client resolving one attribute for one ticker.

use crate::response::ChartResponse;
use crate::url::chart_url;
use crate::{ChartTransport, FetchConfig, HttpTransport, RetryPolicy};
use screener_types::{AttributeKind, AttributeValue, NO_DATA, Ticker, group_thousands};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Resolves ticker attributes against the chart endpoint.
///
/// Lookups never fail: transport errors are retried per the
/// [`RetryPolicy`] and anything that still yields no data resolves to
/// [`NO_DATA`].
#[derive(Debug, Clone)]
pub struct QuoteClient {
    transport: Arc<dyn ChartTransport>,
    retry: RetryPolicy,
    base_url: String,
}

impl QuoteClient {
    /// Creates a client over an arbitrary transport.
    #[must_use]
    pub fn new(transport: Arc<dyn ChartTransport>, config: &FetchConfig) -> Self {
        Self {
            transport,
            retry: RetryPolicy::from_config(config),
            base_url: config.base_url.clone(),
        }
    }

    /// Creates a client over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn http(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Fetches one attribute for one ticker.
    pub async fn fetch(&self, ticker: &Ticker, kind: AttributeKind) -> AttributeValue {
        let url = chart_url(&self.base_url, ticker, kind);
        let symbol = ticker.canonical();

        let body = match self.retry.run(&url, || self.transport.get(&url)).await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to fetch {kind} for {symbol}: {e}");
                return NO_DATA;
            }
        };

        let value = ChartResponse::parse(&body)
            .ok()
            .and_then(|response| response.extract(kind));

        match value {
            Some(value) => {
                match kind {
                    AttributeKind::Price => info!("{symbol}: ${value:.2}"),
                    AttributeKind::AverageVolume => {
                        info!("{symbol}: {} avg volume", group_thousands(value.round()));
                    }
                }
                value
            }
            None => {
                warn!("No {kind} data available for {symbol}");
                NO_DATA
            }
        }
    }
}
