//! Core types for the screener ticker filter.
//!
//! This crate provides the fundamental data structures shared by the
//! screener crates:
//!
//! - [`Ticker`] - A validated ticker symbol with its canonical lookup form
//! - [`AttributeKind`] - The two attributes resolved per ticker (price, average volume)
//! - [`AttributeMap`] - Ticker to attribute value mapping
//! - [`group_thousands`] / [`format_price`] - Number formatting for logs and reports
//! - [`ScreenerError`] - Top-level error type

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod attribute;
mod error;
mod number;
mod ticker;

pub use attribute::{AttributeKind, AttributeMap, AttributeValue, NO_DATA};
pub use error::{Result, ScreenerError};
pub use number::{format_price, group_thousands};
pub use ticker::{Ticker, TickerError};
