//! Rate-limited, retrying, cached quote fetching for the screener ticker filter.
//!
//! This crate provides the bulk-fetch pipeline:
//!
//! - [`url::chart_url`] - Constructs chart endpoint URLs
//! - [`ChartTransport`] / [`HttpTransport`] - Single GET request seam
//! - [`RetryPolicy`] - Bounded exponential-backoff retry
//! - [`QuoteClient`] - Resolves one attribute for one ticker
//! - [`BatchScheduler`] - Runs lookups in bounded concurrent groups
//! - [`FetchOrchestrator`] - Reconciles the cache with fresh lookups

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
mod orchestrator;
mod response;
mod retry;
mod scheduler;
mod transport;
pub mod url;

#[cfg(test)]
mod testing;

pub use client::QuoteClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, FetchConfig};
pub use orchestrator::{CachePolicy, FetchOrchestrator, Resolved};
pub use response::{Chart, ChartMeta, ChartResponse, ChartResult, Indicators, QuoteSeries};
pub use retry::RetryPolicy;
pub use scheduler::{BatchProgress, BatchScheduler, ProgressObserver};
pub use transport::{ChartTransport, HttpTransport, TransportError};
