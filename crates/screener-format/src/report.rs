//! Plain-text filter report.

use crate::{FilterOutcome, Thresholds};
use chrono::{DateTime, Local};
use screener_types::{format_price, group_thousands};
use std::fmt;
use std::path::{Path, PathBuf};

/// Returns the report path for an output sheet.
///
/// A `.csv` extension is replaced by `_report.txt`; any other file name
/// gets `_report.txt` appended.
///
/// ```
/// use screener_format::report_path;
/// use std::path::Path;
///
/// assert_eq!(
///     report_path(Path::new("out/filtered_list.csv")),
///     Path::new("out/filtered_list_report.txt")
/// );
/// ```
#[must_use]
pub fn report_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = name.strip_suffix(".csv").unwrap_or(&name);
    output.with_file_name(format!("{base}_report.txt"))
}

/// Summary of a filter run, rendered through [`fmt::Display`].
#[derive(Debug, Clone)]
pub struct Report<'a> {
    input: &'a Path,
    output: &'a Path,
    thresholds: &'a Thresholds,
    outcome: &'a FilterOutcome,
    generated: DateTime<Local>,
}

impl<'a> Report<'a> {
    /// Creates a report dated now.
    #[must_use]
    pub fn new(
        input: &'a Path,
        output: &'a Path,
        thresholds: &'a Thresholds,
        outcome: &'a FilterOutcome,
    ) -> Self {
        Self {
            input,
            output,
            thresholds,
            outcome,
            generated: Local::now(),
        }
    }

    /// Overrides the report date.
    #[must_use]
    pub fn with_date(mut self, generated: DateTime<Local>) -> Self {
        self.generated = generated;
        self
    }

    /// Renders the report and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_string())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stock Filter Report")?;
        writeln!(f, "=================")?;
        writeln!(f)?;
        writeln!(f, "Input file: {}", self.input.display())?;
        writeln!(f, "Output file: {}", self.output.display())?;
        writeln!(
            f,
            "Minimum volume threshold: {}",
            group_thousands(self.thresholds.min_avg_volume)
        )?;
        writeln!(
            f,
            "Price range: {} - {}",
            format_price(self.thresholds.min_price),
            format_price(self.thresholds.max_price)
        )?;
        writeln!(f, "Date: {}", self.generated.format("%-m/%-d/%Y, %-I:%M:%S %p"))?;
        writeln!(f)?;

        writeln!(f, "Summary:")?;
        writeln!(f, "- Total tickers analyzed: {}", self.outcome.total())?;
        writeln!(f, "- Tickers meeting all criteria: {}", self.outcome.kept.len())?;
        writeln!(f, "- Tickers filtered out: {}", self.outcome.removed.len())?;
        writeln!(f)?;

        writeln!(f, "Tickers Meeting Criteria:")?;
        let mut kept: Vec<_> = self.outcome.kept.iter().collect();
        kept.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        for item in kept {
            writeln!(
                f,
                "{}: Volume={}, Price={}",
                item.ticker,
                group_thousands(item.volume),
                format_price(item.price)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Filtered Out Tickers:")?;
        let mut removed: Vec<_> = self.outcome.removed.iter().collect();
        removed.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        for item in removed {
            writeln!(
                f,
                "{}: Volume={}, Price={} - Removed due to: {}",
                item.ticker,
                group_thousands(item.volume),
                format_price(item.price),
                item.reasons_text()
            )?;
        }
        Ok(())
    }
}
