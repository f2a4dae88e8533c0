//! Error types for the Ronda workspace.
//!
//! Missing data is never an error: it travels through every stage as `None`.
//! The variants here cover precondition violations (malformed panels, bad
//! configuration) and failures from the I/O collaborators.

use thiserror::Error;

/// The main error type for Ronda operations.
#[derive(Debug, Error)]
pub enum RondaError {
    /// Error due to invalid or malformed data, such as unsorted or duplicate dates.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error due to an out-of-range configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error when two shapes that must agree do not.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// Error when a required column is missing from a DataFrame.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error when a symbol is not found in a panel.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Error when a date cannot be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RondaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RondaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Ronda operations.
pub type Result<T> = std::result::Result<T, RondaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RondaError::InvalidData("dates not increasing".to_string());
        assert_eq!(err.to_string(), "Invalid data: dates not increasing");

        let err = RondaError::DimensionMismatch {
            expected: 10,
            actual: 5,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 10, got 5");

        let err = RondaError::MissingColumn("date".to_string());
        assert_eq!(err.to_string(), "Missing required column: date");
    }

    #[test]
    fn test_error_from_str() {
        let err: RondaError = "cannot combine zero factors".into();
        assert!(matches!(err, RondaError::Other(_)));
    }
}
