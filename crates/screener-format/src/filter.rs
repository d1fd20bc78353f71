//! Volume and price screening.

use screener_types::{
    AttributeMap, AttributeValue, NO_DATA, Ticker, format_price, group_thousands,
};
use std::fmt;
use tracing::{debug, info};

/// Limits a ticker must satisfy to be kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Minimum average daily volume over the last month.
    pub min_avg_volume: f64,
    /// Minimum share price in dollars.
    pub min_price: f64,
    /// Maximum share price in dollars.
    pub max_price: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_avg_volume: 2_000_000.0,
            min_price: 2.0,
            max_price: 500.0,
        }
    }
}

impl Thresholds {
    /// Returns every limit the given values violate, or an empty list if
    /// they pass.
    #[must_use]
    pub fn evaluate(&self, volume: AttributeValue, price: AttributeValue) -> Vec<Reason> {
        let mut reasons = Vec::new();
        if volume < self.min_avg_volume {
            reasons.push(Reason::LowVolume {
                volume,
                min: self.min_avg_volume,
            });
        }
        if price < self.min_price {
            reasons.push(Reason::LowPrice {
                price,
                min: self.min_price,
            });
        }
        if price > self.max_price {
            reasons.push(Reason::HighPrice {
                price,
                max: self.max_price,
            });
        }
        reasons
    }
}

/// Why a ticker was filtered out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reason {
    /// Average volume below the minimum.
    LowVolume {
        /// Observed average volume.
        volume: f64,
        /// Required minimum.
        min: f64,
    },
    /// Price below the minimum.
    LowPrice {
        /// Observed price.
        price: f64,
        /// Required minimum.
        min: f64,
    },
    /// Price above the maximum.
    HighPrice {
        /// Observed price.
        price: f64,
        /// Allowed maximum.
        max: f64,
    },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowVolume { volume, min } => write!(
                f,
                "low volume ({} < {})",
                group_thousands(*volume),
                group_thousands(*min)
            ),
            Self::LowPrice { price, min } => {
                write!(f, "low price ({} < {})", format_price(*price), format_price(*min))
            }
            Self::HighPrice { price, max } => {
                write!(f, "high price ({} > {})", format_price(*price), format_price(*max))
            }
        }
    }
}

/// A ticker that passed every limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Screened {
    /// The ticker.
    pub ticker: Ticker,
    /// Average volume used for screening.
    pub volume: AttributeValue,
    /// Price used for screening.
    pub price: AttributeValue,
}

/// A ticker that failed at least one limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Removed {
    /// The ticker.
    pub ticker: Ticker,
    /// Average volume used for screening.
    pub volume: AttributeValue,
    /// Price used for screening.
    pub price: AttributeValue,
    /// Every violated limit, never empty.
    pub reasons: Vec<Reason>,
}

impl Removed {
    /// Returns the reasons joined with `", "`.
    #[must_use]
    pub fn reasons_text(&self) -> String {
        self.reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of screening a ticker list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    /// Tickers meeting all criteria, in input order.
    pub kept: Vec<Screened>,
    /// Tickers filtered out, in input order.
    pub removed: Vec<Removed>,
}

impl FilterOutcome {
    /// Number of tickers screened.
    #[must_use]
    pub fn total(&self) -> usize {
        self.kept.len() + self.removed.len()
    }

    /// Returns the kept tickers.
    #[must_use]
    pub fn kept_tickers(&self) -> Vec<Ticker> {
        self.kept.iter().map(|s| s.ticker.clone()).collect()
    }
}

/// Screens `tickers` against `thresholds`.
///
/// Tickers absent from either map are screened as if the value were
/// [`NO_DATA`], so they always fail the volume limit.
#[must_use]
pub fn filter_tickers(
    tickers: &[Ticker],
    prices: &AttributeMap,
    volumes: &AttributeMap,
    thresholds: &Thresholds,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for ticker in tickers {
        let volume = volumes.get(ticker).copied().unwrap_or(NO_DATA);
        let price = prices.get(ticker).copied().unwrap_or(NO_DATA);
        let reasons = thresholds.evaluate(volume, price);

        if reasons.is_empty() {
            outcome.kept.push(Screened {
                ticker: ticker.clone(),
                volume,
                price,
            });
        } else {
            let removed = Removed {
                ticker: ticker.clone(),
                volume,
                price,
                reasons,
            };
            debug!("{}: {}", removed.ticker, removed.reasons_text());
            outcome.removed.push(removed);
        }
    }

    info!(
        "Filtered down to {} tickers (removed {})",
        outcome.kept.len(),
        outcome.removed.len()
    );
    outcome
}
