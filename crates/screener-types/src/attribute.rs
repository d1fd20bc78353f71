//! Attribute kinds resolved for each ticker.

use crate::Ticker;
use std::collections::BTreeMap;

/// A resolved attribute value.
///
/// Always non-negative. [`NO_DATA`] stands in for "nothing could be
/// obtained" and is indistinguishable from a true zero.
pub type AttributeValue = f64;

/// Sentinel value for a ticker whose attribute could not be resolved.
pub const NO_DATA: AttributeValue = 0.0;

/// Mapping from ticker to a resolved attribute value.
///
/// Ordered so that persisted caches and reports are stable across runs.
pub type AttributeMap = BTreeMap<Ticker, AttributeValue>;

/// An attribute fetched from the quote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Current trading price.
    Price,
    /// Mean daily volume over the last month.
    AverageVolume,
}

impl AttributeKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::AverageVolume => "volume",
        }
    }

    /// Returns the chart `range` query parameter for this kind.
    #[must_use]
    pub const fn range(&self) -> &'static str {
        match self {
            Self::Price => "1d",
            Self::AverageVolume => "1mo",
        }
    }

    /// Returns the file name of this kind's persisted cache.
    #[must_use]
    pub const fn cache_file_name(&self) -> &'static str {
        match self {
            Self::Price => "price_cache.json",
            Self::AverageVolume => "volume_cache.json",
        }
    }

    /// Returns all kinds, in resolution order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Price, Self::AverageVolume]
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
