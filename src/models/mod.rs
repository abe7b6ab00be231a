//! Data models for stays and the metric tables derived from them.

pub mod metrics;
pub mod stay;

pub use metrics::{
    BedOccupancy, CensusDay, DatasetSummary, DateCount, MetricsReport, ReadmissionAnalysis,
    WardAverageStay, WardCensusDay, WardReadmissionRate, WardVolume, WeekdayCount,
};
pub use stay::{ReadmissionRecord, StayRecord, StayWithLength};
