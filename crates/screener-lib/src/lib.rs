//! Library for screening ticker lists by price and average volume.
//!
//! This is a facade crate that re-exports functionality from the screener
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use screener_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let input = TickerInput::load("complete_list.csv".as_ref())?;
//!     let orchestrator = FetchOrchestrator::http(CacheStore::default(), &FetchConfig::default())?;
//!
//!     let resolved = orchestrator.resolve(&input.tickers, CachePolicy::Use).await;
//!     let outcome = filter_tickers(
//!         &input.tickers,
//!         &resolved.prices,
//!         &resolved.volumes,
//!         &Thresholds::default(),
//!     );
//!     println!("{} tickers kept", outcome.kept.len());
//!
//!     Ok(())
//! }
//! ```

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use screener_types::*;

// Re-export the cache store
pub use screener_cache::{CacheError, CacheStore};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use screener_fetch::{
    BatchProgress, BatchScheduler, CachePolicy, ChartTransport, DEFAULT_BASE_URL,
    DEFAULT_USER_AGENT, FetchConfig, FetchOrchestrator, HttpTransport, ProgressObserver,
    QuoteClient, Resolved, RetryPolicy, TransportError,
};

// Re-export tabular input and output
#[cfg(feature = "format")]
pub use screener_format::{
    FilterOutcome, FormatError, Reason, Removed, Report, Screened, Thresholds, TickerInput,
    Watchlist, WatchlistSection, convert_watchlist, extract_tickers, filter_tickers,
    report_path, rewrite_csv,
};

/// Prelude module for convenient imports.
///
/// ```
/// use screener_lib::prelude::*;
/// ```
pub mod prelude {
    pub use screener_types::{
        AttributeKind, AttributeMap, NO_DATA, Result, ScreenerError, Ticker,
    };

    pub use screener_cache::CacheStore;

    #[cfg(feature = "fetch")]
    pub use screener_fetch::{
        BatchProgress, CachePolicy, FetchConfig, FetchOrchestrator, ProgressObserver, Resolved,
    };

    #[cfg(feature = "format")]
    pub use screener_format::{
        FilterOutcome, Report, Thresholds, TickerInput, convert_watchlist, filter_tickers,
        report_path, rewrite_csv,
    };
}
