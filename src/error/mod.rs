//! Error handling for ward metrics derivation.
//!
//! Row-level errors carry the 1-based data row of the offending stay so the
//! caller can locate it in the source file. Records built in memory report
//! row 0.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use chrono::NaiveDate;
use parquet::errors::ParquetError;

/// Errors that can occur while loading stays or deriving metrics
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// A date field is not a valid calendar date
    #[error("Parse error at row {row}: column '{column}' has unparsable date '{value}'")]
    ParseError {
        row: usize,
        column: String,
        value: String,
    },

    /// Discharge precedes admission
    #[error(
        "Validation error at row {row}: patient '{patient_id}' discharged {discharge} before admission {admission}"
    )]
    ValidationError {
        row: usize,
        patient_id: String,
        admission: NaiveDate,
        discharge: NaiveDate,
    },

    /// Input is empty or a rate denominator is zero
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A required field is empty for one row
    #[error("Missing field at row {row}: column '{column}' is empty")]
    MissingField { row: usize, column: String },

    /// A required column is absent from the header or schema
    #[error("Missing column '{column}'")]
    MissingColumn { column: String },

    /// Error opening or reading a file
    #[error("IO error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error reading or writing delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error serializing a report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MetricsError {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The data row this error refers to, if it is a row-level error
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::ParseError { row, .. }
            | Self::ValidationError { row, .. }
            | Self::MissingField { row, .. } => Some(*row),
            _ => None,
        }
    }
}

/// Result type for ward metrics operations
pub type Result<T> = std::result::Result<T, MetricsError>;
