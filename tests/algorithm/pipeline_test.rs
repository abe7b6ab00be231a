//! Tests for the full metrics pipeline

use ward_metrics::synth::{SynthConfig, generate_stays};
use ward_metrics::{MetricsConfig, MetricsError, derive_metrics};

use crate::utils::{assert_close, date, sample_stays, stay};

#[test]
fn test_derive_metrics_sample() {
    let report = derive_metrics(&sample_stays(), &MetricsConfig::default()).unwrap();

    let summary = &report.summary;
    assert_eq!(summary.stays, 5);
    assert_eq!(summary.patients, 3);
    assert_eq!(summary.wards, 2);
    assert_eq!(summary.first_admission, date(2024, 1, 1));
    assert_eq!(summary.last_discharge, date(2024, 3, 4));
    assert_close(summary.mean_length_of_stay, 3.0);
    assert_eq!(summary.readmitted_stays, 1);
    assert_eq!(summary.readmission_window_days, 30);

    assert_eq!(report.ward_averages.len(), 2);
    assert_eq!(report.bed_occupancy.len(), 2);
    assert_eq!(report.readmission_rates.len(), 2);
    assert_eq!(report.admission_trend.len(), 5);
    assert_eq!(report.weekday_admissions.len(), 7);

    let peak = report.peak_census().unwrap();
    assert_eq!(peak.occupied_beds, 2);
    assert_eq!(peak.date, date(2024, 1, 3));
}

#[test]
fn test_empty_input_is_degenerate() {
    let err = derive_metrics(&[], &MetricsConfig::default()).unwrap_err();
    assert!(matches!(err, MetricsError::DegenerateInput(_)));
}

#[test]
fn test_invalid_stay_fails_the_whole_batch() {
    let mut stays = sample_stays();
    stays.push(stay("P4", "ICU", date(2024, 5, 2), date(2024, 5, 1)));
    let err = derive_metrics(&stays, &MetricsConfig::default()).unwrap_err();
    assert!(matches!(err, MetricsError::ValidationError { .. }));
}

#[test]
fn test_configured_window_reaches_report() {
    let config = MetricsConfig::default().with_readmission_window(60);
    let report = derive_metrics(&sample_stays(), &config).unwrap();
    assert_eq!(report.summary.readmitted_stays, 2);
    assert_eq!(report.summary.readmission_window_days, 60);
}

#[test]
fn test_window_shorter_than_a_day_is_degenerate() {
    for window in [0, -5] {
        let config = MetricsConfig::default().with_readmission_window(window);
        let err = derive_metrics(&sample_stays(), &config).unwrap_err();
        assert!(
            matches!(err, MetricsError::DegenerateInput(ref msg) if msg.contains("window")),
            "window {window}: {err}"
        );
    }
}

#[test]
fn test_one_day_window_is_accepted() {
    let config = MetricsConfig::default().with_readmission_window(1);
    let report = derive_metrics(&sample_stays(), &config).unwrap();
    assert_eq!(report.summary.readmission_window_days, 1);
    assert_eq!(report.summary.readmitted_stays, 0);
}

#[test]
fn test_parallel_matches_sequential() {
    let stays = generate_stays(&SynthConfig {
        patients: 150,
        seed: 7,
        ..SynthConfig::default()
    });
    let sequential = derive_metrics(&stays, &MetricsConfig::default()).unwrap();
    let parallel = derive_metrics(&stays, &MetricsConfig::default().with_parallel(true)).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_report_serializes_to_json() {
    let report = derive_metrics(&sample_stays(), &MetricsConfig::default()).unwrap();
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["summary"]["stays"], 5);
    assert_eq!(value["ward_averages"][0]["ward"], "Cardiology");
    assert_eq!(value["daily_census"][0]["date"], "2024-01-01");
    assert_eq!(value["weekday_admissions"][0]["weekday"], "Mon");
}
