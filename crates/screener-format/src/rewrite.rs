//! Writes the filtered ticker sheet.

use crate::{FormatError, extract::read_rows, ticker_cell};
use csv::{Terminator, WriterBuilder};
use screener_types::Ticker;
use std::collections::HashSet;

/// Rewrites `content` with every ticker cell not in `kept` blanked.
///
/// Rows keep their shape. Section headings (`###...`) and cells that are
/// not ticker symbols are copied unchanged. Blank lines are dropped and
/// records end in CRLF.
///
/// # Errors
///
/// Returns an error if `content` is not valid CSV.
pub fn rewrite_csv(content: &str, kept: &HashSet<Ticker>) -> Result<String, FormatError> {
    let rows = read_rows(content)?;
    if rows.is_empty() {
        return Ok(content.to_string());
    }

    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    for row in &rows {
        let record = row.iter().map(|cell| match ticker_cell(cell) {
            Some(ticker) if !kept.contains(&ticker) => "",
            _ => cell.as_str(),
        });
        writer.write_record(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::Io(e.into_error()))?;
    let mut output = String::from_utf8(bytes)?;
    // Single trailing record terminator is not part of the sheet
    if output.ends_with("\r\n") {
        output.truncate(output.len() - 2);
    }
    Ok(output)
}
