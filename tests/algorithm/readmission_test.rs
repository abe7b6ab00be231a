//! Tests for 30-day readmission detection

use ward_metrics::algorithm::metrics::{compute_readmissions, is_readmission_gap};
use ward_metrics::models::ReadmissionRecord;

use crate::utils::{assert_close, date, sample_stays, stay};

fn flag_for<'a>(records: &'a [ReadmissionRecord], patient: &str, admitted: chrono::NaiveDate) -> &'a ReadmissionRecord {
    records
        .iter()
        .find(|r| r.stay.patient_id == patient && r.stay.admission_date == admitted)
        .unwrap()
}

#[test]
fn test_gap_boundaries() {
    assert!(!is_readmission_gap(0, 30));
    assert!(is_readmission_gap(1, 30));
    assert!(is_readmission_gap(30, 30));
    assert!(!is_readmission_gap(31, 30));
    assert!(!is_readmission_gap(-3, 30));
}

#[test]
fn test_readmission_within_window_is_flagged() {
    let stays = vec![
        stay("P", "Medical", date(2024, 1, 1), date(2024, 1, 5)),
        stay("P", "Medical", date(2024, 1, 20), date(2024, 1, 25)),
        stay("P", "Medical", date(2024, 3, 1), date(2024, 3, 2)),
    ];
    let analysis = compute_readmissions(&stays, 30);

    let first = flag_for(&analysis.records, "P", date(2024, 1, 1));
    assert_eq!(first.days_until_next_admission, Some(15));
    assert_eq!(first.next_admission, Some(date(2024, 1, 20)));
    assert!(first.is_readmitted);

    // Next admission is 36 days later
    let second = flag_for(&analysis.records, "P", date(2024, 1, 20));
    assert_eq!(second.days_until_next_admission, Some(36));
    assert!(!second.is_readmitted);

    let last = flag_for(&analysis.records, "P", date(2024, 3, 1));
    assert_eq!(last.next_admission, None);
    assert_eq!(last.days_until_next_admission, None);
    assert!(!last.is_readmitted);
}

#[test]
fn test_only_the_immediately_next_admission_counts() {
    // B is admitted after A but discharged before A; C is 10 days after A's
    // discharge but is not A's next admission.
    let stays = vec![
        stay("P", "Medical", date(2024, 1, 1), date(2024, 1, 10)),
        stay("P", "Medical", date(2024, 1, 2), date(2024, 1, 4)),
        stay("P", "Medical", date(2024, 1, 20), date(2024, 1, 21)),
    ];
    let analysis = compute_readmissions(&stays, 30);

    let a = flag_for(&analysis.records, "P", date(2024, 1, 1));
    assert_eq!(a.days_until_next_admission, Some(-8));
    assert!(!a.is_readmitted);

    let b = flag_for(&analysis.records, "P", date(2024, 1, 2));
    assert_eq!(b.days_until_next_admission, Some(16));
    assert!(b.is_readmitted);

    assert_eq!(analysis.readmitted_count(), 1);
}

#[test]
fn test_same_day_readmission_is_not_flagged() {
    let stays = vec![
        stay("P", "ICU", date(2024, 1, 1), date(2024, 1, 5)),
        stay("P", "ICU", date(2024, 1, 5), date(2024, 1, 6)),
    ];
    let analysis = compute_readmissions(&stays, 30);
    assert_eq!(analysis.records[0].days_until_next_admission, Some(0));
    assert_eq!(analysis.readmitted_count(), 0);
}

#[test]
fn test_exactly_thirty_days_is_flagged() {
    let stays = vec![
        stay("P", "ICU", date(2024, 1, 1), date(2024, 1, 1)),
        stay("P", "ICU", date(2024, 1, 31), date(2024, 2, 1)),
        stay("Q", "ICU", date(2024, 1, 1), date(2024, 1, 1)),
        stay("Q", "ICU", date(2024, 2, 1), date(2024, 2, 2)),
    ];
    let analysis = compute_readmissions(&stays, 30);
    assert!(flag_for(&analysis.records, "P", date(2024, 1, 1)).is_readmitted);
    assert!(!flag_for(&analysis.records, "Q", date(2024, 1, 1)).is_readmitted);
}

#[test]
fn test_records_are_sorted_by_patient_then_admission() {
    let analysis = compute_readmissions(&sample_stays(), 30);
    let order: Vec<(&str, chrono::NaiveDate)> = analysis
        .records
        .iter()
        .map(|r| (r.stay.patient_id.as_str(), r.stay.admission_date))
        .collect();
    assert_eq!(
        order,
        vec![
            ("P1", date(2024, 1, 1)),
            ("P1", date(2024, 1, 20)),
            ("P2", date(2024, 1, 3)),
            ("P3", date(2024, 1, 10)),
            ("P3", date(2024, 3, 1)),
        ]
    );
}

#[test]
fn test_single_stay_counts_in_denominator_only() {
    let stays = vec![stay("Solo", "Maternity", date(2024, 6, 1), date(2024, 6, 3))];
    let analysis = compute_readmissions(&stays, 30);
    assert_eq!(analysis.readmitted_count(), 0);

    let rate = analysis.rate_for("Maternity").unwrap();
    assert_eq!(rate.total_discharges, 1);
    assert_eq!(rate.readmissions, 0);
    assert_close(rate.readmission_rate, 0.0);
}

#[test]
fn test_ward_readmission_rates() {
    let analysis = compute_readmissions(&sample_stays(), 30);

    let wards: Vec<&str> = analysis.rates.iter().map(|r| r.ward.as_str()).collect();
    assert_eq!(wards, vec!["Cardiology", "Surgery"]);

    let cardiology = analysis.rate_for("Cardiology").unwrap();
    assert_eq!(cardiology.total_discharges, 3);
    assert_eq!(cardiology.readmissions, 1);
    assert_close(cardiology.readmission_rate, 1.0 / 3.0);

    let surgery = analysis.rate_for("Surgery").unwrap();
    assert_eq!(surgery.total_discharges, 2);
    assert_eq!(surgery.readmissions, 0);

    assert!(
        analysis
            .rates
            .iter()
            .all(|r| (0.0..=1.0).contains(&r.readmission_rate))
    );
}

#[test]
fn test_wider_window() {
    // P3 returns 45 days after discharge
    let analysis = compute_readmissions(&sample_stays(), 60);
    let cardiology = analysis.rate_for("Cardiology").unwrap();
    assert_eq!(cardiology.readmissions, 2);
}

#[test]
fn test_empty_input() {
    let analysis = compute_readmissions(&[], 30);
    assert!(analysis.records.is_empty());
    assert!(analysis.rates.is_empty());
}

#[test]
fn test_input_is_not_mutated() {
    let stays = vec![
        stay("B", "ICU", date(2024, 2, 1), date(2024, 2, 2)),
        stay("A", "ICU", date(2024, 1, 1), date(2024, 1, 2)),
    ];
    let before = stays.clone();
    let _ = compute_readmissions(&stays, 30);
    assert_eq!(stays, before);
}
