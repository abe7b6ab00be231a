//! Tests for length of stay and ward averages

use ward_metrics::MetricsError;
use ward_metrics::algorithm::metrics::{
    compute_length_of_stay, compute_ward_averages, mean_length_of_stay,
};

use crate::utils::{assert_close, date, sample_stays, stay};

#[test]
fn test_length_of_stay_is_whole_days() {
    let annotated = compute_length_of_stay(&sample_stays()).unwrap();
    let lengths: Vec<i64> = annotated.iter().map(|s| s.length_of_stay).collect();
    assert_eq!(lengths, vec![4, 0, 6, 2, 3]);
    assert!(annotated.iter().all(|s| s.length_of_stay >= 0));
}

#[test]
fn test_length_of_stay_keeps_input_order_and_records() {
    let stays = sample_stays();
    let annotated = compute_length_of_stay(&stays).unwrap();
    assert_eq!(annotated.len(), stays.len());
    for (original, entry) in stays.iter().zip(&annotated) {
        assert_eq!(original, &entry.stay);
    }
}

#[test]
fn test_discharge_before_admission_is_a_validation_error() {
    let mut stays = sample_stays();
    stays.push(stay("P9", "ICU", date(2024, 2, 10), date(2024, 2, 8)).with_row(6));

    let err = compute_length_of_stay(&stays).unwrap_err();
    match err {
        MetricsError::ValidationError {
            row,
            patient_id,
            admission,
            discharge,
        } => {
            assert_eq!(row, 6);
            assert_eq!(patient_id, "P9");
            assert_eq!(admission, date(2024, 2, 10));
            assert_eq!(discharge, date(2024, 2, 8));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn test_ward_averages() {
    let annotated = compute_length_of_stay(&sample_stays()).unwrap();
    let averages = compute_ward_averages(&annotated);

    let wards: Vec<&str> = averages.iter().map(|a| a.ward.as_str()).collect();
    assert_eq!(wards, vec!["Cardiology", "Surgery"]);

    assert_eq!(averages[0].stays, 3);
    assert_eq!(averages[0].total_days, 12);
    assert_close(averages[0].average_days, 4.0);

    assert_eq!(averages[1].stays, 2);
    assert_eq!(averages[1].total_days, 3);
    assert_close(averages[1].average_days, 1.5);
}

#[test]
fn test_ward_average_matches_total_over_count() {
    let annotated = compute_length_of_stay(&sample_stays()).unwrap();
    for average in compute_ward_averages(&annotated) {
        let restricted: Vec<i64> = annotated
            .iter()
            .filter(|s| s.stay.ward == average.ward)
            .map(|s| s.length_of_stay)
            .collect();
        let mean = restricted.iter().sum::<i64>() as f64 / restricted.len() as f64;
        assert_close(average.average_days, mean);
        assert_close(average.average_days, average.total_days as f64 / average.stays as f64);
    }
}

#[test]
fn test_empty_input_gives_empty_averages() {
    let annotated = compute_length_of_stay(&[]).unwrap();
    assert!(annotated.is_empty());
    assert!(compute_ward_averages(&annotated).is_empty());
    assert_eq!(mean_length_of_stay(&annotated), None);
}

#[test]
fn test_mean_length_of_stay() {
    let annotated = compute_length_of_stay(&sample_stays()).unwrap();
    assert_close(mean_length_of_stay(&annotated).unwrap(), 3.0);
}
