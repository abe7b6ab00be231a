//! Admission and discharge trends, weekday admissions and ward volume

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;

use crate::algorithm::metrics::grouping::group_by_ward;
use crate::models::{DateCount, StayRecord, WardVolume, WeekdayCount};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn count_by_date<F>(records: &[StayRecord], date_of: F) -> Vec<DateCount>
where
    F: Fn(&StayRecord) -> NaiveDate,
{
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for stay in records {
        *counts.entry(date_of(stay)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(date, count)| DateCount { date, count })
        .collect()
}

/// Admissions per calendar day, ascending
#[must_use]
pub fn compute_admission_trend(records: &[StayRecord]) -> Vec<DateCount> {
    count_by_date(records, |stay| stay.admission_date)
}

/// Discharges per calendar day, ascending
#[must_use]
pub fn compute_discharge_trend(records: &[StayRecord]) -> Vec<DateCount> {
    count_by_date(records, |stay| stay.discharge_date)
}

/// Admissions per weekday, Monday first, all seven days present
#[must_use]
pub fn compute_weekday_admissions(records: &[StayRecord]) -> Vec<WeekdayCount> {
    let mut counts = [0usize; 7];
    for stay in records {
        counts[stay.admission_date.weekday().num_days_from_monday() as usize] += 1;
    }
    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(&weekday, admissions)| WeekdayCount {
            weekday,
            admissions,
        })
        .collect()
}

/// Stays per ward, busiest first; ties keep first-appearance order
#[must_use]
pub fn compute_ward_volume(records: &[StayRecord]) -> Vec<WardVolume> {
    group_by_ward(records, |stay| stay.ward.as_str())
        .into_iter()
        .map(|group| WardVolume {
            ward: group.ward.to_string(),
            stays: group.members.len(),
        })
        .sorted_by(|a, b| b.stays.cmp(&a.stays))
        .collect()
}
