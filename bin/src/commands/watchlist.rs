//! Watchlist command implementation.

use anyhow::{Context, Result};
use screener_lib::convert_watchlist;
use std::path::Path;
use tracing::info;

/// Characters of the watchlist shown in the log preview.
const PREVIEW_CHARS: usize = 200;

/// Convert a gaps sheet into a TradingView watchlist file.
pub(crate) fn watchlist(input: &Path, output: &Path, quiet: bool) -> Result<()> {
    info!("Starting conversion...");
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let watchlist = convert_watchlist(&content)
        .with_context(|| format!("Failed to convert {}", input.display()))?;
    let line = watchlist.to_string();

    std::fs::write(output, &line)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let preview: String = line.chars().take(PREVIEW_CHARS).collect();
    let ellipsis = if preview.len() < line.len() { "..." } else { "" };
    info!("Output preview: {preview}{ellipsis}");

    if !quiet {
        println!(
            "Wrote {} symbols in {} sections to: {}",
            watchlist.symbol_count(),
            watchlist.sections.len(),
            output.display()
        );
    }
    Ok(())
}
