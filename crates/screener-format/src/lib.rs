//! Tabular input, filtering and report output for the screener ticker filter.
//!
//! - [`TickerInput`] / [`extract_tickers`] - Find ticker cells in CSV-like text
//! - [`Thresholds`] / [`filter_tickers`] - Apply volume and price limits
//! - [`rewrite_csv`] - Blank out tickers that did not pass the filter
//! - [`Report`] - Human-readable filter report
//! - [`convert_watchlist`] - Convert a gaps sheet into a TradingView watchlist

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod extract;
mod filter;
mod report;
mod rewrite;
mod watchlist;

pub use error::FormatError;
pub use extract::{TickerInput, extract_tickers, read_rows, ticker_cell};
pub use filter::{FilterOutcome, Reason, Removed, Screened, Thresholds, filter_tickers};
pub use report::{Report, report_path};
pub use rewrite::rewrite_csv;
pub use watchlist::{Watchlist, WatchlistSection, convert_watchlist};
