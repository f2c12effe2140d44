//! Error types for canopy-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the canopy-io crate.
///
/// Covers missing files, format-specific failures from CSV, JSON and
/// Parquet, validation problems, and errors surfaced by the weather and
/// calendar crates while turning rows into typed tables.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a CSV parsing or file access failure.
    #[error("csv error in {}: {reason}", path.display())]
    Csv {
        /// File being read.
        path: PathBuf,
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps a JSON parsing, serialization or file access failure.
    #[error("json error in {}: {reason}", path.display())]
    Json {
        /// File being read or written.
        path: PathBuf,
        /// Description of the underlying JSON failure.
        reason: String,
    },

    /// Wraps an error originating from the Arrow or Parquet libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when a required column is not present in a file.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Wraps an error originating from the canopy-weather crate.
    #[error("weather error: {reason}")]
    Weather {
        /// Description of the underlying weather failure.
        reason: String,
    },

    /// Wraps an error originating from the canopy-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<canopy_weather::WeatherError> for IoError {
    fn from(e: canopy_weather::WeatherError) -> Self {
        IoError::Weather {
            reason: e.to_string(),
        }
    }
}

impl From<canopy_calendar::CalendarError> for IoError {
    fn from(e: canopy_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}
