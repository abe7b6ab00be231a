//! Length of stay and per-ward averages

use log::debug;

use crate::algorithm::metrics::grouping::group_by_ward;
use crate::error::{MetricsError, Result};
use crate::models::{StayRecord, StayWithLength, WardAverageStay};

/// Length of one stay in whole days
///
/// # Errors
/// Returns `ValidationError` when discharge precedes admission
pub fn length_of_stay(stay: &StayRecord) -> Result<i64> {
    let days = (stay.discharge_date - stay.admission_date).num_days();
    if days < 0 {
        return Err(MetricsError::ValidationError {
            row: stay.row,
            patient_id: stay.patient_id.clone(),
            admission: stay.admission_date,
            discharge: stay.discharge_date,
        });
    }
    Ok(days)
}

/// Annotate every stay with its length of stay
///
/// The whole batch fails on the first invalid stay; no partial output is produced.
pub fn compute_length_of_stay(records: &[StayRecord]) -> Result<Vec<StayWithLength>> {
    let annotated = records
        .iter()
        .map(|stay| {
            Ok(StayWithLength {
                length_of_stay: length_of_stay(stay)?,
                stay: stay.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Computed length of stay for {} stays", annotated.len());
    Ok(annotated)
}

/// Mean length of stay across all stays, `None` for an empty slice
#[must_use]
pub fn mean_length_of_stay(annotated: &[StayWithLength]) -> Option<f64> {
    if annotated.is_empty() {
        return None;
    }
    let total: i64 = annotated.iter().map(|s| s.length_of_stay).sum();
    Some(total as f64 / annotated.len() as f64)
}

/// Mean length of stay per ward
#[must_use]
pub fn compute_ward_averages(annotated: &[StayWithLength]) -> Vec<WardAverageStay> {
    group_by_ward(annotated, |s| s.stay.ward.as_str())
        .into_iter()
        .map(|group| {
            let stays = group.members.len();
            let total_days: i64 = group.members.iter().map(|s| s.length_of_stay).sum();
            WardAverageStay {
                ward: group.ward.to_string(),
                stays,
                total_days,
                average_days: total_days as f64 / stays as f64,
            }
        })
        .collect()
}
