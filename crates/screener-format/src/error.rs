//! Formatting errors.

use thiserror::Error;

/// Errors that can occur while reading or writing tabular data.
#[derive(Error, Debug)]
pub enum FormatError {
    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("Invalid UTF-8 in output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The sheet lacks the section and column header rows.
    #[error("Expected at least 3 header rows, found {found}")]
    MissingHeaderRows {
        /// Number of rows present.
        found: usize,
    },
}
