//! Error types for screener.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for screener operations.
pub type Result<T> = std::result::Result<T, ScreenerError>;

/// Errors that abort a screening run.
///
/// Per-ticker failures never surface here; they resolve to
/// [`NO_DATA`](crate::NO_DATA) inside the fetch pipeline.
#[derive(Error, Debug)]
pub enum ScreenerError {
    /// The input file could not be read.
    #[error("Failed to read input file '{path}': {source}")]
    ReadInput {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The input contained no ticker symbols.
    #[error("No valid tickers found in {path}")]
    NoTickers {
        /// The input that was scanned.
        path: PathBuf,
    },

    /// The input could not be parsed as tabular text.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_input() {
        let err = ScreenerError::NoTickers {
            path: PathBuf::from("complete_list.csv"),
        };
        assert_eq!(err.to_string(), "No valid tickers found in complete_list.csv");

        let err = ScreenerError::ReadInput {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read input file 'missing.csv': not found"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
