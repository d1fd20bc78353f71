//! Persistent attribute cache for the screener ticker filter.
//!
//! Each [`AttributeKind`](screener_types::AttributeKind) has its own JSON
//! file mapping ticker symbols to resolved values. Files are loaded
//! wholesale at startup and rewritten wholesale after each fetch pass:
//!
//! - [`CacheStore`] - Load, save and clear per-kind cache files
//! - [`CacheError`] - Errors surfaced by the fallible operations

#![doc(issue_tracker_base_url = "https://github.com/factordynamics/screener/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod store;

pub use store::{CacheError, CacheStore, Result};
