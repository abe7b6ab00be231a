//! Algorithm implementations for hospital operations analysis
//!
//! This module contains the metric derivations computed over patient stays.

pub mod metrics;
