//! Stay record model
//!
//! A `StayRecord` is one admission event: a patient occupying a bed on a ward
//! from the admission date through the discharge date. Patients may appear in
//! several records. Derived annotations wrap the record rather than mutating it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One patient admission event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRecord {
    /// Patient identifier, not unique across records
    pub patient_id: String,
    /// Ward label
    pub ward: String,
    /// Date of admission
    pub admission_date: NaiveDate,
    /// Date of discharge
    pub discharge_date: NaiveDate,
    /// 1-based data row in the source file, 0 when built in memory
    #[serde(default)]
    pub row: usize,
}

impl StayRecord {
    /// Create a new stay record
    #[must_use]
    pub fn new(
        patient_id: impl Into<String>,
        ward: impl Into<String>,
        admission_date: NaiveDate,
        discharge_date: NaiveDate,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            ward: ward.into(),
            admission_date,
            discharge_date,
            row: 0,
        }
    }

    /// Attach the source row this record was read from
    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    /// Whether the patient occupies a bed on `date` (both endpoints inclusive)
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.admission_date <= date && date <= self.discharge_date
    }

    /// Every calendar day from admission through discharge, inclusive
    ///
    /// Yields nothing when discharge precedes admission.
    pub fn occupied_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.admission_date
            .iter_days()
            .take_while(move |date| *date <= self.discharge_date)
    }
}

/// A stay annotated with its length in whole days
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StayWithLength {
    /// The underlying stay
    pub stay: StayRecord,
    /// `discharge_date - admission_date` in days, never negative
    pub length_of_stay: i64,
}

/// A stay annotated with its readmission status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadmissionRecord {
    /// The underlying stay
    pub stay: StayRecord,
    /// Admission date of the same patient's next stay, if any
    pub next_admission: Option<NaiveDate>,
    /// Days from this discharge to the next admission
    pub days_until_next_admission: Option<i64>,
    /// Whether the next admission falls inside the readmission window
    pub is_readmitted: bool,
}
