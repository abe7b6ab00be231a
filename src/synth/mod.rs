//! Synthetic stay generation
//!
//! Produces plausible stay tables for demos and benchmarks. A given seed always
//! yields the same stays.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::StayRecord;

/// Settings for synthetic stay generation
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Seed for the random number generator
    pub seed: u64,
    /// Number of distinct patients
    pub patients: usize,
    /// Ward labels to draw from
    pub wards: Vec<String>,
    /// First possible admission date
    pub start_date: NaiveDate,
    /// Number of days over which first admissions are spread
    pub period_days: i64,
    /// Longest possible stay in days
    pub max_length_of_stay: i64,
    /// Maximum stays per patient
    pub max_stays_per_patient: usize,
    /// Longest gap between one discharge and the next admission
    pub max_gap_days: i64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            patients: 200,
            wards: ["Cardiology", "Emergency", "ICU", "Maternity", "Orthopedics", "Pediatrics"]
                .iter()
                .map(|w| (*w).to_string())
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            period_days: 180,
            max_length_of_stay: 14,
            max_stays_per_patient: 3,
            max_gap_days: 90,
        }
    }
}

/// Generate synthetic stays, grouped by patient in chronological order
#[must_use]
pub fn generate_stays(config: &SynthConfig) -> Vec<StayRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut stays = Vec::new();
    if config.wards.is_empty() {
        return stays;
    }

    for patient in 0..config.patients {
        let patient_id = format!("P{:05}", patient + 1);
        let stay_count = rng.random_range(1..=config.max_stays_per_patient.max(1));
        let mut admission =
            config.start_date + Duration::days(rng.random_range(0..=config.period_days.max(0)));

        for _ in 0..stay_count {
            let ward = &config.wards[rng.random_range(0..config.wards.len())];
            let length = rng.random_range(0..=config.max_length_of_stay.max(0));
            let discharge = admission + Duration::days(length);
            stays.push(StayRecord::new(patient_id.clone(), ward.clone(), admission, discharge));

            let gap = rng.random_range(0..=config.max_gap_days.max(0));
            admission = discharge + Duration::days(gap);
        }
    }

    log::debug!(
        "Generated {} synthetic stays for {} patients",
        stays.len(),
        config.patients
    );
    stays
}
