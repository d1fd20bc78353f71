//! Ticker symbol representation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a valid ticker symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid ticker symbol: {0:?}")]
pub struct TickerError(pub String);

/// A ticker symbol such as `AAPL`, `BRK.B` or `ABC/WS`.
///
/// Valid symbols are 1 to 5 characters drawn from `A-Z`, `0-9`, `.`, `/`
/// and `-`. The original spelling is kept as the identity of the ticker;
/// [`Ticker::canonical`] gives the form used for remote lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Maximum symbol length.
    pub const MAX_LEN: usize = 5;

    /// Parses a cell value as a ticker symbol.
    ///
    /// Surrounding whitespace is ignored. Returns `None` if the trimmed
    /// value is empty, too long, or contains characters outside the
    /// ticker alphabet.
    #[must_use]
    pub fn parse(cell: &str) -> Option<Self> {
        let trimmed = cell.trim();
        Self::is_valid(trimmed).then(|| Self(trimmed.to_string()))
    }

    /// Returns true if `symbol` is a well-formed ticker symbol.
    #[must_use]
    pub fn is_valid(symbol: &str) -> bool {
        (1..=Self::MAX_LEN).contains(&symbol.len())
            && symbol.bytes().all(|b| {
                b.is_ascii_uppercase() || b.is_ascii_digit() || matches!(b, b'.' | b'/' | b'-')
            })
    }

    /// Returns the symbol as written in the input.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the symbol used for remote lookups.
    ///
    /// Any `/`-suffixed qualifier (warrants, units) is stripped, so
    /// `ABC/WS` is looked up as `ABC`.
    #[must_use]
    pub fn canonical(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Ticker {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TickerError(s.to_string()))
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        for symbol in ["A", "AAPL", "BRK.B", "ABC/W", "X-1", "12345"] {
            assert!(Ticker::parse(symbol).is_some(), "{symbol} should parse");
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let ticker = Ticker::parse("  MSFT ").unwrap();
        assert_eq!(ticker.as_str(), "MSFT");
    }

    #[test]
    fn test_parse_rejects() {
        for cell in ["", "   ", "aapl", "TOOLONG", "AB CD", "A$B", "Up", "###X"] {
            assert!(Ticker::parse(cell).is_none(), "{cell:?} should be rejected");
        }
    }

    #[test]
    fn test_canonical_strips_qualifier() {
        let ticker: Ticker = "ABC/W".parse().unwrap();
        assert_eq!(ticker.canonical(), "ABC");
        assert_eq!(ticker.as_str(), "ABC/W");

        let plain: Ticker = "AAPL".parse().unwrap();
        assert_eq!(plain.canonical(), "AAPL");
    }

    #[test]
    fn test_from_str_error() {
        let err = "bad one".parse::<Ticker>().unwrap_err();
        assert_eq!(err, TickerError("bad one".to_string()));
    }

    #[test]
    fn test_serde_transparent() {
        let ticker: Ticker = "SPY".parse().unwrap();
        let json = serde_json::to_string(&ticker).unwrap();
        assert_eq!(json, "\"SPY\"");
        let back: Ticker = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ticker);
    }
}
