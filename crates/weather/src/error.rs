//! Error types for the canopy-weather crate.

use canopy_calendar::{CalendarError, NaiveDate};

/// Error type for all fallible operations in the canopy-weather crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeatherError {
    /// Returned when two rows carry the same date.
    #[error("duplicate weather date {date}")]
    DuplicateDate {
        /// The repeated date.
        date: NaiveDate,
    },

    /// Returned when a requested parameter column is absent.
    #[error("weather parameter '{param}' not found")]
    MissingParameter {
        /// Name of the parameter.
        param: String,
    },

    /// Returned when the value matrix does not match dates and parameters.
    #[error("values have shape {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    ShapeMismatch {
        /// Rows supplied.
        rows: usize,
        /// Columns supplied.
        cols: usize,
        /// Number of dates.
        expected_rows: usize,
        /// Number of parameters.
        expected_cols: usize,
    },

    /// Returned when two tables with different columns are concatenated.
    #[error("cannot concatenate tables with different parameters: {left:?} vs {right:?}")]
    ParameterMismatch {
        /// Columns of the first table.
        left: Vec<String>,
        /// Columns of the second table.
        right: Vec<String>,
    },

    /// Returned when statistics vectors are not aligned with the parameters.
    #[error("statistics for {params} parameters have {means} means and {stds} standard deviations")]
    StatsLength {
        /// Number of parameters.
        params: usize,
        /// Number of means.
        means: usize,
        /// Number of standard deviations.
        stds: usize,
    },

    /// Returned when a parameter has too few finite values for statistics.
    #[error("parameter '{param}' has {count} finite values, need at least 2")]
    InsufficientData {
        /// Name of the parameter.
        param: String,
        /// Number of finite values found.
        count: usize,
    },

    /// Returned when a provider record cannot be interpreted.
    #[error("malformed weather record {index}: {reason}")]
    MalformedRecord {
        /// Position of the record.
        index: usize,
        /// What was wrong.
        reason: String,
    },

    /// Returned when a date cannot be parsed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
