//! Logging utilities
//!
//! This module provides standardized logging functions for load and derive
//! operations.

use std::path::Path;

use crate::reader::RejectedRow;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file being operated on
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - Path of the file that was operated on
/// * `stays` - Number of stays processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    stays: usize,
    elapsed: Option<std::time::Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} stays from {} in {:?}",
            operation,
            stays,
            path.display(),
            duration
        ),
        None => log::info!(
            "Successfully {} {} stays from {}",
            operation,
            stays,
            path.display()
        ),
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Log each row dropped by the skip policy
pub fn log_rejected_rows(rejected: &[RejectedRow], path: &Path) {
    if rejected.is_empty() {
        return;
    }
    log_warning(
        &format!("{} malformed rows were skipped", rejected.len()),
        Some(path),
    );
    for rejected_row in rejected {
        log::debug!("  row {}: {}", rejected_row.row, rejected_row.error);
    }
}
