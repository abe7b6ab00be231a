//! A Rust library for deriving hospital ward metrics from patient stay records:
//! length of stay, bed occupancy, daily census, admission trends and 30-day
//! readmissions.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod reader;
pub mod schema;
pub mod synth;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{MalformedRowPolicy, MetricsConfig};
pub use error::{MetricsError, Result};
pub use models::{MetricsReport, StayRecord, StayWithLength};

// Derivations
pub use algorithm::metrics::{
    compute_bed_occupancy, compute_daily_census, compute_length_of_stay, compute_readmissions,
    compute_ward_averages, derive_metrics,
};

// Input
pub use reader::{LoadedStays, read_stays, read_stays_csv, read_stays_parquet};
