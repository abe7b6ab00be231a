//! Full metrics pipeline
//!
//! Every stage reads the same immutable stays and returns a new table. With
//! `MetricsConfig::parallel` the stay-length tables and the event tables are
//! built on the rayon pool.

use std::time::Instant;

use itertools::Itertools;
use log::{debug, info};

use crate::algorithm::metrics::length_of_stay::{
    compute_length_of_stay, compute_ward_averages, mean_length_of_stay,
};
use crate::algorithm::metrics::occupancy::{
    compute_bed_occupancy, compute_daily_census, compute_ward_census,
};
use crate::algorithm::metrics::readmission::compute_readmissions;
use crate::algorithm::metrics::trends::{
    compute_admission_trend, compute_discharge_trend, compute_ward_volume,
    compute_weekday_admissions,
};
use crate::config::MetricsConfig;
use crate::error::{MetricsError, Result};
use crate::models::{
    BedOccupancy, CensusDay, DatasetSummary, DateCount, MetricsReport, ReadmissionAnalysis,
    StayRecord, StayWithLength, WardAverageStay, WardCensusDay, WardVolume, WeekdayCount,
};

/// Tables derived from lengths of stay
struct StayTables {
    ward_averages: Vec<WardAverageStay>,
    bed_occupancy: Vec<BedOccupancy>,
    daily_census: Vec<CensusDay>,
    ward_census: Vec<WardCensusDay>,
}

/// Tables derived from admission and discharge events
struct EventTables {
    readmissions: ReadmissionAnalysis,
    admission_trend: Vec<DateCount>,
    discharge_trend: Vec<DateCount>,
    weekday_admissions: Vec<WeekdayCount>,
    ward_volume: Vec<WardVolume>,
}

fn stay_tables(annotated: &[StayWithLength]) -> Result<StayTables> {
    Ok(StayTables {
        ward_averages: compute_ward_averages(annotated),
        bed_occupancy: compute_bed_occupancy(annotated)?,
        daily_census: compute_daily_census(annotated),
        ward_census: compute_ward_census(annotated),
    })
}

fn event_tables(records: &[StayRecord], window_days: i64) -> EventTables {
    EventTables {
        readmissions: compute_readmissions(records, window_days),
        admission_trend: compute_admission_trend(records),
        discharge_trend: compute_discharge_trend(records),
        weekday_admissions: compute_weekday_admissions(records),
        ward_volume: compute_ward_volume(records),
    }
}

/// Derive every metric table from a set of stays
///
/// # Errors
/// Returns `DegenerateInput` for an empty input, a readmission window shorter
/// than one day, or when bed occupancy is undefined, and `ValidationError` for
/// a stay discharged before admission
pub fn derive_metrics(records: &[StayRecord], config: &MetricsConfig) -> Result<MetricsReport> {
    if records.is_empty() {
        return Err(MetricsError::DegenerateInput(
            "no stay records to derive metrics from".to_string(),
        ));
    }

    let window_days = config.readmission_window_days;
    if window_days < 1 {
        return Err(MetricsError::DegenerateInput(format!(
            "readmission window must be at least one day, got {window_days}"
        )));
    }

    let start = Instant::now();
    let annotated = compute_length_of_stay(records)?;

    let (stays, events) = if config.parallel {
        debug!("Deriving metric tables in parallel");
        rayon::join(
            || stay_tables(&annotated),
            || event_tables(records, window_days),
        )
    } else {
        (stay_tables(&annotated), event_tables(records, window_days))
    };
    let stays = stays?;

    let summary = DatasetSummary {
        stays: records.len(),
        patients: records.iter().map(|s| s.patient_id.as_str()).unique().count(),
        wards: events.ward_volume.len(),
        first_admission: records
            .iter()
            .map(|s| s.admission_date)
            .min()
            .unwrap_or_default(),
        last_discharge: records
            .iter()
            .map(|s| s.discharge_date)
            .max()
            .unwrap_or_default(),
        mean_length_of_stay: mean_length_of_stay(&annotated).unwrap_or(0.0),
        readmitted_stays: events.readmissions.readmitted_count(),
        readmission_window_days: window_days,
    };

    info!(
        "Derived metrics for {} stays ({} patients, {} wards) in {:?}",
        summary.stays,
        summary.patients,
        summary.wards,
        start.elapsed()
    );

    Ok(MetricsReport {
        summary,
        ward_averages: stays.ward_averages,
        bed_occupancy: stays.bed_occupancy,
        daily_census: stays.daily_census,
        ward_census: stays.ward_census,
        readmission_rates: events.readmissions.rates,
        admission_trend: events.admission_trend,
        discharge_trend: events.discharge_trend,
        weekday_admissions: events.weekday_admissions,
        ward_volume: events.ward_volume,
    })
}
