//! Bed occupancy and daily census
//!
//! Occupancy uses the largest per-ward stay count as a stand-in for bed
//! capacity, shared by every ward:
//!
//! `rate = bed_days_used / (capacity_proxy * overall_mean_length_of_stay)`
//!
//! Rates are not clamped and may exceed 1.0. The census counts a stay on every
//! day from admission through discharge, both ends included. Days that no stay
//! covers are left out of the census.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;

use crate::algorithm::metrics::grouping::group_by_ward;
use crate::algorithm::metrics::length_of_stay::mean_length_of_stay;
use crate::error::{MetricsError, Result};
use crate::models::{BedOccupancy, CensusDay, StayWithLength, WardCensusDay};

/// Approximate bed occupancy rate per ward
///
/// An empty input yields an empty table.
///
/// # Errors
/// Returns `DegenerateInput` when every stay has zero length, since the
/// denominator is then zero
pub fn compute_bed_occupancy(annotated: &[StayWithLength]) -> Result<Vec<BedOccupancy>> {
    if annotated.is_empty() {
        return Ok(Vec::new());
    }

    let groups = group_by_ward(annotated, |s| s.stay.ward.as_str());
    let capacity_proxy = groups.iter().map(|g| g.members.len()).max().unwrap_or(0);
    let mean = mean_length_of_stay(annotated).unwrap_or(0.0);
    let denominator = capacity_proxy as f64 * mean;

    if capacity_proxy == 0 || denominator <= 0.0 {
        return Err(MetricsError::DegenerateInput(format!(
            "bed occupancy denominator is zero (capacity proxy {capacity_proxy}, mean length of stay {mean})"
        )));
    }

    debug!("Bed occupancy: capacity proxy {capacity_proxy}, mean length of stay {mean:.3}");

    Ok(groups
        .into_iter()
        .map(|group| {
            let bed_days_used: i64 = group.members.iter().map(|s| s.length_of_stay).sum();
            BedOccupancy {
                ward: group.ward.to_string(),
                bed_days_used,
                capacity_proxy,
                mean_length_of_stay: mean,
                occupancy_rate: bed_days_used as f64 / denominator,
            }
        })
        .collect())
}

/// Occupied beds per calendar day, ascending by date
#[must_use]
pub fn compute_daily_census(annotated: &[StayWithLength]) -> Vec<CensusDay> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for entry in annotated {
        for date in entry.stay.occupied_days() {
            *counts.entry(date).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(date, occupied_beds)| CensusDay {
            date,
            occupied_beds,
        })
        .collect()
}

/// Occupied beds per calendar day and ward
///
/// Sorted by date, then by ward in first-appearance order.
#[must_use]
pub fn compute_ward_census(annotated: &[StayWithLength]) -> Vec<WardCensusDay> {
    let groups = group_by_ward(annotated, |s| s.stay.ward.as_str());
    let mut counts: BTreeMap<(NaiveDate, usize), usize> = BTreeMap::new();

    for (ward_idx, group) in groups.iter().enumerate() {
        for entry in &group.members {
            for date in entry.stay.occupied_days() {
                *counts.entry((date, ward_idx)).or_insert(0) += 1;
            }
        }
    }

    counts
        .into_iter()
        .map(|((date, ward_idx), occupied_beds)| WardCensusDay {
            date,
            ward: groups[ward_idx].ward.to_string(),
            occupied_beds,
        })
        .collect()
}
