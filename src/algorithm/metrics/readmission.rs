//! 30-day readmission detection
//!
//! Stays are ordered by `(patient_id, admission_date)`. Each stay is compared
//! only with the same patient's immediately next stay: it is a readmission when
//! `0 < next_admission - discharge <= window` days. A later stay that happens to
//! fall inside the window of an earlier discharge does not count unless it is
//! the next one. A patient's last stay is never flagged but still counts
//! towards its ward's discharges.

use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;

use crate::algorithm::metrics::grouping::ward_order;
use crate::models::{ReadmissionAnalysis, ReadmissionRecord, StayRecord, WardReadmissionRate};

/// Whether a gap in days between discharge and next admission is a readmission
#[must_use]
pub fn is_readmission_gap(gap_days: i64, window_days: i64) -> bool {
    gap_days > 0 && gap_days <= window_days
}

/// Flag readmissions and compute per-ward readmission rates
#[must_use]
pub fn compute_readmissions(records: &[StayRecord], window_days: i64) -> ReadmissionAnalysis {
    let sorted = records
        .iter()
        .sorted_by(|a, b| {
            a.patient_id
                .cmp(&b.patient_id)
                .then(a.admission_date.cmp(&b.admission_date))
        })
        .collect_vec();

    let mut annotated = Vec::with_capacity(sorted.len());
    for stays in sorted.chunk_by(|a, b| a.patient_id == b.patient_id) {
        for (i, stay) in stays.iter().enumerate() {
            let next_admission = stays.get(i + 1).map(|next| next.admission_date);
            let days_until_next_admission =
                next_admission.map(|next| (next - stay.discharge_date).num_days());
            let is_readmitted = days_until_next_admission
                .is_some_and(|gap| is_readmission_gap(gap, window_days));

            annotated.push(ReadmissionRecord {
                stay: (*stay).clone(),
                next_admission,
                days_until_next_admission,
                is_readmitted,
            });
        }
    }

    let rates = compute_ward_readmission_rates(records, &annotated);
    debug!(
        "Flagged {} readmissions across {} stays",
        annotated.iter().filter(|r| r.is_readmitted).count(),
        annotated.len()
    );

    ReadmissionAnalysis {
        records: annotated,
        rates,
    }
}

/// Per-ward `readmissions / total_discharges`, wards in input order
fn compute_ward_readmission_rates(
    records: &[StayRecord],
    annotated: &[ReadmissionRecord],
) -> Vec<WardReadmissionRate> {
    let mut tallies: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
    for record in annotated {
        let tally = tallies.entry(record.stay.ward.as_str()).or_insert((0, 0));
        tally.0 += 1;
        if record.is_readmitted {
            tally.1 += 1;
        }
    }

    ward_order(records, |stay| stay.ward.as_str())
        .into_iter()
        .map(|ward| {
            let (total_discharges, readmissions) = tallies.get(ward).copied().unwrap_or((0, 0));
            WardReadmissionRate {
                ward: ward.to_string(),
                total_discharges,
                readmissions,
                readmission_rate: readmissions as f64 / total_discharges as f64,
            }
        })
        .collect()
}
