//! Error types for the canopy-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the canopy-calendar crate.
///
/// This enum covers unparseable date strings, inverted date ranges, and
/// degenerate window specifications.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a date string cannot be parsed.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate {
        /// The string that was provided.
        input: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// Returned when a range ends before it starts.
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// Returned when a window has a zero-length input or output part, or its
    /// total length does not fit in a `u32`.
    #[error(
        "invalid window: input_days={input_days}, output_days={output_days} (both must be >= 1, total <= {max})",
        max = u32::MAX
    )]
    InvalidWindow {
        /// Requested input length in days.
        input_days: u32,
        /// Requested output length in days.
        output_days: u32,
    },
}
