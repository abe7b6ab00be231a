//! Derived metric tables
//!
//! Every table is a plain snapshot computed from the full set of stays. Per-ward
//! tables list wards in order of first appearance in the input.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;

use crate::models::stay::ReadmissionRecord;

/// Mean length of stay for one ward
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardAverageStay {
    pub ward: String,
    /// Number of stays on the ward
    pub stays: usize,
    /// Sum of lengths of stay on the ward
    pub total_days: i64,
    /// `total_days / stays`
    pub average_days: f64,
}

/// Approximate bed occupancy for one ward
///
/// Bed capacity is not measured: the largest per-ward stay count in the data is
/// used as a proxy for every ward, so the rate can exceed 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BedOccupancy {
    pub ward: String,
    /// Sum of lengths of stay on the ward
    pub bed_days_used: i64,
    /// Largest stay count observed on any ward
    pub capacity_proxy: usize,
    /// Mean length of stay across all wards
    pub mean_length_of_stay: f64,
    /// `bed_days_used / (capacity_proxy * mean_length_of_stay)`
    pub occupancy_rate: f64,
}

/// Number of occupied beds on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CensusDay {
    pub date: NaiveDate,
    pub occupied_beds: usize,
}

/// Number of occupied beds on one ward on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WardCensusDay {
    pub date: NaiveDate,
    pub ward: String,
    pub occupied_beds: usize,
}

/// Readmission rate for one ward
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardReadmissionRate {
    pub ward: String,
    /// Every stay on the ward, including a patient's last stay
    pub total_discharges: usize,
    /// Stays followed by a readmission inside the window
    pub readmissions: usize,
    /// `readmissions / total_discharges`, always within [0, 1]
    pub readmission_rate: f64,
}

/// Output of the readmission pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadmissionAnalysis {
    /// Stays ordered by patient then admission date
    pub records: Vec<ReadmissionRecord>,
    /// Per-ward rates in first-appearance order
    pub rates: Vec<WardReadmissionRate>,
}

impl ReadmissionAnalysis {
    /// Number of flagged stays
    #[must_use]
    pub fn readmitted_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_readmitted).count()
    }

    /// Rate for a single ward
    #[must_use]
    pub fn rate_for(&self, ward: &str) -> Option<&WardReadmissionRate> {
        self.rates.iter().find(|r| r.ward == ward)
    }
}

/// Event count on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Admissions falling on one weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    pub weekday: Weekday,
    pub admissions: usize,
}

/// Patient volume on one ward
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WardVolume {
    pub ward: String,
    pub stays: usize,
}

/// Headline figures for a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub stays: usize,
    pub patients: usize,
    pub wards: usize,
    pub first_admission: NaiveDate,
    pub last_discharge: NaiveDate,
    pub mean_length_of_stay: f64,
    pub readmitted_stays: usize,
    pub readmission_window_days: i64,
}

/// Every derived table for one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub summary: DatasetSummary,
    pub ward_averages: Vec<WardAverageStay>,
    pub bed_occupancy: Vec<BedOccupancy>,
    pub daily_census: Vec<CensusDay>,
    pub ward_census: Vec<WardCensusDay>,
    pub readmission_rates: Vec<WardReadmissionRate>,
    pub admission_trend: Vec<DateCount>,
    pub discharge_trend: Vec<DateCount>,
    pub weekday_admissions: Vec<WeekdayCount>,
    pub ward_volume: Vec<WardVolume>,
}

impl MetricsReport {
    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Busiest day in the census
    #[must_use]
    pub fn peak_census(&self) -> Option<CensusDay> {
        self.daily_census
            .iter()
            .copied()
            .max_by(|a, b| a.occupied_beds.cmp(&b.occupied_beds).then(b.date.cmp(&a.date)))
    }
}
