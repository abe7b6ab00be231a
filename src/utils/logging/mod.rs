//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for logging, console output, and progress tracking.

pub mod console;
pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use console::{
    SummaryTable, WardTables, format_percentage, format_summary, format_ward_tables, print_report,
};
pub use self::log::{log_operation_complete, log_operation_start, log_rejected_rows, log_warning};
pub use progress::{create_spinner, finish_and_clear, finish_progress_bar};
