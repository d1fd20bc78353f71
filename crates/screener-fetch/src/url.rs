//! Chart endpoint URL construction.

use screener_types::{AttributeKind, Ticker};

/// Builds the chart URL for a ticker and attribute kind.
///
/// URL format: `{base_url}{CANONICAL}?interval=1d&range={RANGE}`
///
/// # Example
///
/// ```
/// use screener_fetch::url::chart_url;
/// use screener_types::{AttributeKind, Ticker};
///
/// let ticker: Ticker = "ABC/W".parse().unwrap();
/// let url = chart_url("https://example.com/chart/", &ticker, AttributeKind::AverageVolume);
/// assert_eq!(url, "https://example.com/chart/ABC?interval=1d&range=1mo");
/// ```
#[must_use]
pub fn chart_url(base_url: &str, ticker: &Ticker, kind: AttributeKind) -> String {
    format!(
        "{}{}?interval=1d&range={}",
        base_url,
        ticker.canonical(),
        kind.range()
    )
}

/// Recovers the ticker symbol from a chart URL.
///
/// Returns the last path segment with any query string removed, or the
/// whole input if it has no path separator.
#[must_use]
pub fn ticker_from_url(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}
