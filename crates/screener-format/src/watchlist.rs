//! Gaps sheet to TradingView watchlist conversion.
//!
//! The sheet has a title row, a row naming the three sections
//! ("Complete List", "Trimmed List", "Favorite Gaps") and a row naming the
//! sub-columns of each section. Symbols start on the fourth row.

use crate::{FormatError, read_rows};
use std::fmt;
use tracing::info;

const COMPLETE_LIST: &str = "Complete List";
const TRIMMED_LIST: &str = "Trimmed List";
const FAVORITE_GAPS: &str = "Favorite Gaps";

/// Index of the section label row.
const LABEL_ROW: usize = 1;
/// Index of the sub-column header row.
const HEADER_ROW: usize = 2;
/// Index of the first data row.
const FIRST_DATA_ROW: usize = 3;

/// One titled group of symbols in a watchlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistSection {
    /// Section title without the `###` marker.
    pub title: &'static str,
    /// Symbols in sheet order.
    pub symbols: Vec<String>,
}

/// A TradingView watchlist, rendered as a single import line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    /// Non-empty sections in output order.
    pub sections: Vec<WatchlistSection>,
}

impl Watchlist {
    /// Total number of symbols across all sections.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.sections.iter().map(|s| s.symbols.len()).sum()
    }
}

impl fmt::Display for Watchlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for section in &self.sections {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            write!(f, "###{}", section.title)?;
            for symbol in &section.symbols {
                write!(f, ",{symbol}")?;
            }
        }
        Ok(())
    }
}

/// Column positions of each sub-column, where present.
#[derive(Debug, Default)]
struct Columns {
    complete_up: Option<usize>,
    complete_down: Option<usize>,
    trimmed_up: Option<usize>,
    trimmed_down: Option<usize>,
    bullish: Option<usize>,
    bearish: Option<usize>,
}

impl Columns {
    fn locate(labels: &[String], headers: &[String]) -> Self {
        let find = |label: &str| labels.iter().position(|cell| cell.trim() == label);
        let complete = find(COMPLETE_LIST);
        let trimmed = find(TRIMMED_LIST);
        let favorite = find(FAVORITE_GAPS);
        info!(
            "Sections at columns: complete={complete:?}, trimmed={trimmed:?}, favorite={favorite:?}"
        );

        let complete_end = trimmed.or(favorite).unwrap_or(usize::MAX);
        let complete_span = complete.map(|start| (start, complete_end));
        let trimmed_span = trimmed.map(|start| (start, favorite.unwrap_or(usize::MAX)));
        let favorite_span = favorite.map(|start| (start, usize::MAX));

        // Later matches win, so the rightmost matching column is used
        let mut columns = Self::default();
        for (i, header) in headers.iter().enumerate() {
            let label = labels.get(i).map_or("", String::as_str);
            let owned_by = |section: &str, span: Option<(usize, usize)>| {
                span.is_some_and(|(start, end)| i >= start && i < end)
                    && (label.is_empty() || label == section)
            };

            match header.trim() {
                "Up" if owned_by(COMPLETE_LIST, complete_span) => columns.complete_up = Some(i),
                "Down" if owned_by(COMPLETE_LIST, complete_span) => {
                    columns.complete_down = Some(i);
                }
                _ => {}
            }
            match header.trim() {
                "Up" if owned_by(TRIMMED_LIST, trimmed_span) => columns.trimmed_up = Some(i),
                "Down" if owned_by(TRIMMED_LIST, trimmed_span) => columns.trimmed_down = Some(i),
                _ => {}
            }
            match header.trim() {
                "Bullish" if owned_by(FAVORITE_GAPS, favorite_span) => columns.bullish = Some(i),
                "Bearish" if owned_by(FAVORITE_GAPS, favorite_span) => columns.bearish = Some(i),
                _ => {}
            }
        }
        columns
    }
}

/// Strips whitespace and any parenthesized note from a symbol cell.
fn clean_symbol(cell: &str) -> Option<String> {
    let symbol = cell.split('(').next().unwrap_or(cell).trim();
    (!symbol.is_empty()).then(|| symbol.to_string())
}

fn column(rows: &[Vec<String>], index: Option<usize>) -> Vec<String> {
    let Some(index) = index else {
        return Vec::new();
    };
    rows.iter()
        .filter_map(|row| row.get(index))
        .filter_map(|cell| clean_symbol(cell))
        .collect()
}

/// Converts a gaps sheet into a TradingView watchlist.
///
/// Symbols in a "Complete List" column that also appear in the matching
/// "Trimmed List" column are dropped. Empty sections are omitted.
///
/// # Errors
///
/// Returns an error if `content` is not valid CSV or has fewer than three
/// rows.
pub fn convert_watchlist(content: &str) -> Result<Watchlist, FormatError> {
    let rows = read_rows(content)?;
    info!("Total rows: {}", rows.len());
    if rows.len() < FIRST_DATA_ROW {
        return Err(FormatError::MissingHeaderRows { found: rows.len() });
    }

    let columns = Columns::locate(&rows[LABEL_ROW], &rows[HEADER_ROW]);
    let data = &rows[FIRST_DATA_ROW..];

    let trimmed_up = column(data, columns.trimmed_up);
    let trimmed_down = column(data, columns.trimmed_down);
    let complete_up: Vec<String> = column(data, columns.complete_up)
        .into_iter()
        .filter(|symbol| !trimmed_up.contains(symbol))
        .collect();
    let complete_down: Vec<String> = column(data, columns.complete_down)
        .into_iter()
        .filter(|symbol| !trimmed_down.contains(symbol))
        .collect();

    let sections = [
        ("🐂 Bullish", column(data, columns.bullish)),
        ("🐻 Bearish", column(data, columns.bearish)),
        ("⬆️ Gap Up", trimmed_up),
        ("⬇️ Gap Down", trimmed_down),
        ("👍 Other Gap Ups", complete_up),
        ("👎 Other Gap Downs", complete_down),
    ];

    let watchlist = Watchlist {
        sections: sections
            .into_iter()
            .filter(|(_, symbols)| !symbols.is_empty())
            .map(|(title, symbols)| WatchlistSection { title, symbols })
            .collect(),
    };

    for section in &watchlist.sections {
        info!("- {}: {} symbols", section.title, section.symbols.len());
    }
    Ok(watchlist)
}
