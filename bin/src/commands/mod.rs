//! CLI command implementations.

pub(crate) mod cache;
pub(crate) mod filter;
pub(crate) mod watchlist;
