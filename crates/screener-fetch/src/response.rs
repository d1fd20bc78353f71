//! Chart response schema and attribute extraction.
//!
//! Every level of the response is optional so that a partial or reshaped
//! payload degrades to "no data" instead of a parse failure.

use screener_types::{AttributeKind, AttributeValue};
use serde::Deserialize;

/// Top-level chart response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResponse {
    /// The chart envelope.
    pub chart: Option<Chart>,
}

/// Chart envelope holding zero or more results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chart {
    /// Results, normally a single entry.
    pub result: Option<Vec<ChartResult>>,
}

/// A single chart result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResult {
    /// Instrument metadata.
    pub meta: Option<ChartMeta>,
    /// Time-indexed series.
    pub indicators: Option<Indicators>,
}

/// Instrument metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    /// Latest traded price.
    pub regular_market_price: Option<f64>,
}

/// Indicator block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Indicators {
    /// Quote series, normally a single entry.
    pub quote: Option<Vec<QuoteSeries>>,
}

/// Close and volume series. Individual entries may be null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteSeries {
    /// Close prices.
    pub close: Option<Vec<Option<f64>>>,
    /// Traded volumes.
    pub volume: Option<Vec<Option<f64>>>,
}

impl ChartResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON of a compatible shape.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    fn first_result(&self) -> Option<&ChartResult> {
        self.chart.as_ref()?.result.as_ref()?.first()
    }

    fn quote(&self) -> Option<&QuoteSeries> {
        self.first_result()?
            .indicators
            .as_ref()?
            .quote
            .as_ref()?
            .first()
    }

    /// Returns the current price.
    ///
    /// Prefers the metadata price and falls back to the last non-null close.
    #[must_use]
    pub fn price(&self) -> Option<AttributeValue> {
        let meta_price = self
            .first_result()?
            .meta
            .as_ref()
            .and_then(|meta| meta.regular_market_price);

        meta_price
            .or_else(|| {
                self.quote()?
                    .close
                    .as_ref()?
                    .iter()
                    .rev()
                    .find_map(|close| *close)
            })
            .filter(|price| is_usable(*price))
    }

    /// Returns the arithmetic mean of the non-null volume entries.
    #[must_use]
    pub fn average_volume(&self) -> Option<AttributeValue> {
        let volumes: Vec<f64> = self
            .quote()?
            .volume
            .as_ref()?
            .iter()
            .filter_map(|volume| *volume)
            .collect();

        if volumes.is_empty() {
            return None;
        }

        let mean = volumes.iter().sum::<f64>() / volumes.len() as f64;
        Some(mean).filter(|mean| is_usable(*mean))
    }

    /// Extracts the attribute for `kind`, or `None` if the response has no
    /// usable data for it.
    #[must_use]
    pub fn extract(&self, kind: AttributeKind) -> Option<AttributeValue> {
        match kind {
            AttributeKind::Price => self.price(),
            AttributeKind::AverageVolume => self.average_volume(),
        }
    }
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
