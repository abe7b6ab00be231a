//! Loading stay records from delimited text or Parquet files.
//!
//! Both readers build records through [`build_stay`], so a row is rejected for
//! the same reasons regardless of format: an empty required field, an
//! unparsable date, or a discharge before admission. What happens to a rejected
//! row is decided once per load by [`MalformedRowPolicy`].

pub mod csv;
pub mod parquet;

pub use self::csv::{read_stays_csv, read_stays_from_reader, write_stays_csv};
pub use self::parquet::read_stays_parquet;

use std::path::Path;

use chrono::NaiveDate;
use log::warn;

use crate::algorithm::metrics::length_of_stay;
use crate::config::{MalformedRowPolicy, MetricsConfig};
use crate::error::{MetricsError, Result};
use crate::models::StayRecord;
use crate::schema::{require_date, require_field};

/// A row dropped under `MalformedRowPolicy::SkipAndReport`
#[derive(Debug)]
pub struct RejectedRow {
    /// 1-based data row
    pub row: usize,
    /// Why the row was dropped
    pub error: MetricsError,
}

/// Stays read from one file
#[derive(Debug, Default)]
pub struct LoadedStays {
    /// Valid stays in file order
    pub records: Vec<StayRecord>,
    /// Rows dropped by the skip policy; always empty under fail-fast
    pub rejected: Vec<RejectedRow>,
}

impl LoadedStays {
    /// Whether every row was loaded
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Rows that were dropped
    #[must_use]
    pub fn rejected_rows(&self) -> Vec<usize> {
        self.rejected.iter().map(|r| r.row).collect()
    }
}

/// Applies the malformed row policy while rows are read
pub(crate) struct StayCollector {
    policy: MalformedRowPolicy,
    loaded: LoadedStays,
}

impl StayCollector {
    pub(crate) fn new(policy: MalformedRowPolicy) -> Self {
        Self {
            policy,
            loaded: LoadedStays::default(),
        }
    }

    /// Accept a row result; returns the error under fail-fast
    pub(crate) fn push(&mut self, row: usize, result: Result<StayRecord>) -> Result<()> {
        match (result, self.policy) {
            (Ok(stay), _) => self.loaded.records.push(stay),
            (Err(error), MalformedRowPolicy::SkipAndReport) => {
                warn!("Skipping row {row}: {error}");
                self.loaded.rejected.push(RejectedRow { row, error });
            }
            (Err(error), MalformedRowPolicy::FailFast) => return Err(error),
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> LoadedStays {
        if !self.loaded.rejected.is_empty() {
            warn!(
                "Skipped {} malformed rows, kept {}",
                self.loaded.rejected.len(),
                self.loaded.records.len()
            );
        }
        self.loaded
    }
}

/// Dates for one row, either already typed or still text
pub(crate) enum RawDate<'a> {
    Date(Option<NaiveDate>),
    Text(Option<&'a str>),
}

impl RawDate<'_> {
    fn resolve(self, row: usize, column: &str, config: &MetricsConfig) -> Result<NaiveDate> {
        match self {
            RawDate::Date(Some(date)) => Ok(date),
            RawDate::Date(None) => Err(MetricsError::MissingField {
                row,
                column: column.to_string(),
            }),
            RawDate::Text(value) => require_date(value, row, column, &config.date_format_config),
        }
    }
}

/// Build and validate one stay from raw field values
pub(crate) fn build_stay(
    row: usize,
    patient_id: Option<&str>,
    ward: Option<&str>,
    admission: RawDate<'_>,
    discharge: RawDate<'_>,
    config: &MetricsConfig,
) -> Result<StayRecord> {
    let columns = &config.columns;
    let patient_id = require_field(patient_id, row, &columns.patient_id)?;
    let ward = require_field(ward, row, &columns.ward)?;
    let admission_date = admission.resolve(row, &columns.admission_date, config)?;
    let discharge_date = discharge.resolve(row, &columns.discharge_date, config)?;

    let stay = StayRecord::new(patient_id, ward, admission_date, discharge_date).with_row(row);
    length_of_stay(&stay)?;
    Ok(stay)
}

/// Whether a path names a Parquet file
#[must_use]
pub fn is_parquet_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet") || ext.eq_ignore_ascii_case("pq"))
}

/// Read stays from a file, choosing the reader by extension
pub fn read_stays(path: &Path, config: &MetricsConfig) -> Result<LoadedStays> {
    if is_parquet_path(path) {
        read_stays_parquet(path, config)
    } else {
        read_stays_csv(path, config)
    }
}
