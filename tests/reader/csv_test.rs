//! Tests for reading stays from delimited text

use ward_metrics::reader::{read_stays, read_stays_csv, write_stays_csv};
use ward_metrics::{MalformedRowPolicy, MetricsConfig, MetricsError};

use crate::utils::{date, sample_stays, write_temp_file};

const HOSPITAL_CSV: &str = "\
Patient ID,ward,admission_date,discharge_date
P1,Cardiology,2024-01-01,2024-01-05
P2,Surgery,2024-01-03,2024-01-03
P3,Cardiology,2024-01-10 00:00:00,2024-01-16 00:00:00
";

#[test]
fn test_reads_patient_id_alias_and_datetimes() {
    let (_dir, path) = write_temp_file("stays.csv", HOSPITAL_CSV);
    let loaded = read_stays_csv(&path, &MetricsConfig::default()).unwrap();

    assert!(loaded.is_clean());
    assert_eq!(loaded.records.len(), 3);
    let third = &loaded.records[2];
    assert_eq!(third.patient_id, "P3");
    assert_eq!(third.ward, "Cardiology");
    assert_eq!(third.admission_date, date(2024, 1, 10));
    assert_eq!(third.discharge_date, date(2024, 1, 16));
    assert_eq!(third.row, 3);
}

#[test]
fn test_missing_column_fails_the_file() {
    let (_dir, path) = write_temp_file(
        "stays.csv",
        "patient_id,ward,admission_date\nP1,ICU,2024-01-01\n",
    );
    let err = read_stays_csv(&path, &MetricsConfig::default()).unwrap_err();
    assert!(matches!(err, MetricsError::MissingColumn { column } if column == "discharge_date"));
}

const MALFORMED_CSV: &str = "\
patient_id,ward,admission_date,discharge_date
P1,ICU,2024-01-01,2024-01-03
P2,ICU,not-a-date,2024-01-03
P3,,2024-01-01,2024-01-03
P4,ICU,2024-01-09,2024-01-02
P5,ICU,2024-01-04,2024-01-06
";

#[test]
fn test_fail_fast_reports_first_bad_row() {
    let (_dir, path) = write_temp_file("stays.csv", MALFORMED_CSV);
    let err = read_stays_csv(&path, &MetricsConfig::default()).unwrap_err();
    match err {
        MetricsError::ParseError { row, column, value } => {
            assert_eq!(row, 2);
            assert_eq!(column, "admission_date");
            assert_eq!(value, "not-a-date");
        }
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn test_skip_and_report_keeps_good_rows() {
    let (_dir, path) = write_temp_file("stays.csv", MALFORMED_CSV);
    let config = MetricsConfig::default().with_malformed_rows(MalformedRowPolicy::SkipAndReport);
    let loaded = read_stays_csv(&path, &config).unwrap();

    let patients: Vec<&str> = loaded.records.iter().map(|s| s.patient_id.as_str()).collect();
    assert_eq!(patients, vec!["P1", "P5"]);
    assert_eq!(loaded.rejected_rows(), vec![2, 3, 4]);

    assert!(matches!(loaded.rejected[0].error, MetricsError::ParseError { .. }));
    assert!(matches!(loaded.rejected[1].error, MetricsError::MissingField { row: 3, .. }));
    assert!(matches!(loaded.rejected[2].error, MetricsError::ValidationError { row: 4, .. }));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_stays_csv(&dir.path().join("absent.csv"), &MetricsConfig::default()).unwrap_err();
    assert!(matches!(err, MetricsError::Io { .. }));
}

#[test]
fn test_write_then_read_through_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stays.csv");
    let stays = sample_stays();
    write_stays_csv(&path, &stays, b',').unwrap();

    let loaded = read_stays(&path, &MetricsConfig::default()).unwrap();
    assert_eq!(loaded.records.len(), stays.len());
    for (i, (read, written)) in loaded.records.iter().zip(&stays).enumerate() {
        assert_eq!(read.row, i + 1);
        assert_eq!(read.patient_id, written.patient_id);
        assert_eq!(read.admission_date, written.admission_date);
        assert_eq!(read.discharge_date, written.discharge_date);
    }
}
