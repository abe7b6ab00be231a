//! Configuration for loading stays and deriving ward metrics.

use crate::schema::{ColumnNames, DateFormatConfig};

/// Default number of days after discharge in which a new admission counts as a readmission
pub const DEFAULT_READMISSION_WINDOW_DAYS: i64 = 30;

/// Environment variable overriding the readmission window
pub const READMISSION_WINDOW_ENV: &str = "WARD_METRICS_READMISSION_WINDOW";

/// What to do with a row that fails parsing or validation while loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Abort the load at the first bad row
    #[default]
    FailFast,
    /// Drop bad rows and report them alongside the loaded stays
    SkipAndReport,
}

/// Configuration for ward metrics derivation
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Date format configuration for string-to-date conversions
    pub date_format_config: DateFormatConfig,
    /// Names of the required input columns
    pub columns: ColumnNames,
    /// Field delimiter for delimited text input
    pub delimiter: u8,
    /// Malformed row handling, applied to every row of a load
    pub malformed_rows: MalformedRowPolicy,
    /// Readmission window in days (gap must be > 0 and <= window); must be at
    /// least 1, `derive_metrics` rejects anything shorter
    pub readmission_window_days: i64,
    /// Compute independent tables on the rayon pool
    pub parallel: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            date_format_config: DateFormatConfig::default(),
            columns: ColumnNames::default(),
            delimiter: b',',
            malformed_rows: MalformedRowPolicy::default(),
            readmission_window_days: DEFAULT_READMISSION_WINDOW_DAYS,
            parallel: false,
        }
    }
}

impl MetricsConfig {
    /// Default configuration with environment overrides applied
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(window) = get_readmission_window() {
            config.readmission_window_days = window;
        }
        config
    }

    #[must_use]
    pub fn with_malformed_rows(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_rows = policy;
        self
    }

    #[must_use]
    pub fn with_readmission_window(mut self, days: i64) -> Self {
        self.readmission_window_days = days;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_date_format_config(mut self, config: DateFormatConfig) -> Self {
        self.date_format_config = config;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Helper function to get the readmission window from environment
///
/// Values that are not a positive number of days are ignored with a warning.
#[must_use]
pub fn get_readmission_window() -> Option<i64> {
    let raw = std::env::var(READMISSION_WINDOW_ENV).ok()?;
    match raw.trim().parse::<i64>() {
        Ok(days) if days > 0 => Some(days),
        _ => {
            log::warn!(
                "Ignoring {READMISSION_WINDOW_ENV}={raw}: expected a positive number of days"
            );
            None
        }
    }
}
