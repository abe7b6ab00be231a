//! Ward metrics derivation
//!
//! Pure functions from stay records to derived tables: length of stay, ward
//! averages, bed occupancy, daily census, readmissions and admission trends.
//! No stage mutates its input.

pub mod grouping;
pub mod length_of_stay;
pub mod occupancy;
pub mod pipeline;
pub mod readmission;
pub mod trends;

pub use length_of_stay::{
    compute_length_of_stay, compute_ward_averages, length_of_stay, mean_length_of_stay,
};
pub use occupancy::{compute_bed_occupancy, compute_daily_census, compute_ward_census};
pub use pipeline::derive_metrics;
pub use readmission::{compute_readmissions, is_readmission_gap};
pub use trends::{
    compute_admission_trend, compute_discharge_trend, compute_ward_volume,
    compute_weekday_admissions,
};
