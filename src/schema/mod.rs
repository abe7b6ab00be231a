//! Column mapping and value parsing for stay tables.
//!
//! Input headers are matched after normalisation (trimmed, lower-cased, spaces
//! and hyphens turned into underscores), so `Patient ID` resolves to the
//! `patient_id` column.

pub mod date_utils;

pub use date_utils::{DateFormatConfig, detect_date_format, parse_date_string};

use chrono::NaiveDate;

use crate::error::{MetricsError, Result};

/// Names of the columns a stay table must provide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    /// Patient identifier column
    pub patient_id: String,
    /// Ward label column
    pub ward: String,
    /// Admission date column
    pub admission_date: String,
    /// Discharge date column
    pub discharge_date: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            patient_id: "patient_id".to_string(),
            ward: "ward".to_string(),
            admission_date: "admission_date".to_string(),
            discharge_date: "discharge_date".to_string(),
        }
    }
}

/// Normalise a header name for matching
#[must_use]
pub fn normalize_column_name(name: &str) -> String {
    name.trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Positions of the required columns within a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayColumnIndex {
    pub patient_id: usize,
    pub ward: usize,
    pub admission_date: usize,
    pub discharge_date: usize,
}

impl StayColumnIndex {
    /// Resolve the required columns against a header row
    ///
    /// # Errors
    /// Returns `MissingColumn` for the first required column that is absent
    pub fn resolve<'a, I>(headers: I, names: &ColumnNames) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let normalized: Vec<String> = headers.into_iter().map(normalize_column_name).collect();
        let find = |wanted: &str| -> Result<usize> {
            let wanted_norm = normalize_column_name(wanted);
            normalized
                .iter()
                .position(|h| *h == wanted_norm)
                .ok_or_else(|| MetricsError::MissingColumn {
                    column: wanted.to_string(),
                })
        };

        Ok(Self {
            patient_id: find(&names.patient_id)?,
            ward: find(&names.ward)?,
            admission_date: find(&names.admission_date)?,
            discharge_date: find(&names.discharge_date)?,
        })
    }
}

/// Require a non-empty text field
pub fn require_field(value: Option<&str>, row: usize, column: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(MetricsError::MissingField {
            row,
            column: column.to_string(),
        }),
    }
}

/// Parse a required date field, reporting the row on failure
pub fn require_date(
    value: Option<&str>,
    row: usize,
    column: &str,
    config: &DateFormatConfig,
) -> Result<NaiveDate> {
    let raw = require_field(value, row, column)?;
    parse_date_string(&raw, config).ok_or_else(|| MetricsError::ParseError {
        row,
        column: column.to_string(),
        value: raw,
    })
}
