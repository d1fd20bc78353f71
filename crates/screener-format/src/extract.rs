//! Ticker extraction from CSV-like input.

use crate::FormatError;
use csv::ReaderBuilder;
use screener_types::{ScreenerError, Ticker};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Marker prefix of watchlist section headings.
const SECTION_PREFIX: &str = "###";

/// Parses CSV text into rows of cells.
///
/// Rows may have different lengths and blank lines are skipped. The first
/// row is data, not a header.
///
/// # Errors
///
/// Returns an error if the text is not valid CSV.
pub fn read_rows(content: &str) -> Result<Vec<Vec<String>>, FormatError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    reader
        .records()
        .map(|record| {
            let record = record?;
            Ok(record.iter().map(str::to_string).collect())
        })
        .collect()
}

/// Interprets a single cell as a ticker.
///
/// Section headings (cells starting with `###`) are never tickers.
#[must_use]
pub fn ticker_cell(cell: &str) -> Option<Ticker> {
    if cell.starts_with(SECTION_PREFIX) {
        return None;
    }
    Ticker::parse(cell)
}

/// Collects every distinct ticker in `content`, in order of first appearance.
///
/// # Errors
///
/// Returns an error if the text is not valid CSV.
pub fn extract_tickers(content: &str) -> Result<Vec<Ticker>, FormatError> {
    let rows = read_rows(content)?;
    info!("Parsed {} rows from CSV", rows.len());

    let mut seen = HashSet::new();
    let tickers: Vec<Ticker> = rows
        .iter()
        .flatten()
        .filter_map(|cell| ticker_cell(cell))
        .filter(|ticker| seen.insert(ticker.clone()))
        .collect();

    info!("Extracted {} potential ticker symbols", tickers.len());
    Ok(tickers)
}

/// An input file together with the tickers found in it.
#[derive(Debug, Clone)]
pub struct TickerInput {
    /// Where the input was read from.
    pub path: PathBuf,
    /// Raw file contents, kept for rewriting.
    pub content: String,
    /// Distinct tickers in order of first appearance.
    pub tickers: Vec<Ticker>,
}

impl TickerInput {
    /// Reads `path` and extracts its tickers.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// contains no tickers at all.
    pub fn load(path: &Path) -> screener_types::Result<Self> {
        info!("Reading input file: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| ScreenerError::ReadInput {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!("Successfully read file, size: {} bytes", content.len());

        let started = Instant::now();
        let tickers =
            extract_tickers(&content).map_err(|e| ScreenerError::Parse(e.to_string()))?;
        info!("Extract tickers: {:.2?}", started.elapsed());

        if tickers.is_empty() {
            return Err(ScreenerError::NoTickers {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            content,
            tickers,
        })
    }
}
