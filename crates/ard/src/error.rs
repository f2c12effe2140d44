//! Error types for the canopy-ard crate.

use canopy_calendar::CalendarError;
use canopy_raster::RasterError;
use canopy_smooth::SmoothError;
use canopy_weather::WeatherError;

use crate::window::SlotKey;

/// Broad class of an [`ArdError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or inconsistent input.
    Data,
    /// Valid input that produced no samples.
    EmptyResult,
}

/// Error type for all fallible operations in the canopy-ard crate.
#[derive(Debug, thiserror::Error)]
pub enum ArdError {
    /// Returned when no scene references are supplied.
    #[error("no scene references supplied")]
    EmptyScenes,

    /// Returned when scene references belong to more than one boundary.
    #[error("scene references mix boundaries '{expected}' and '{found}'")]
    MixedBoundaries {
        /// Boundary of the first scene.
        expected: String,
        /// A different boundary found later.
        found: String,
    },

    /// Returned when a second record lands in an occupied window slot.
    #[error("duplicate record for {key}")]
    DuplicateEntry {
        /// The occupied slot.
        key: SlotKey,
    },

    /// Returned when a table that must hold samples is empty.
    #[error("analysis-ready table is empty")]
    EmptyResult,

    /// Returned when an inference table has more than one window for a pixel.
    #[error("pixel ({row}, {col}) has {count} windows, inference needs exactly one")]
    MultipleWindows {
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
        /// Number of windows found.
        count: usize,
    },

    /// Returned when a sample's window lengths disagree with its table.
    #[error("sample at pixel ({row}, {col}) window {window}: {reason}")]
    SampleShape {
        /// Grid row.
        row: usize,
        /// Grid column.
        col: usize,
        /// Window index.
        window: i64,
        /// Which component has the wrong shape.
        reason: String,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the batch worker pool cannot be created.
    #[error("cannot start worker pool: {reason}")]
    WorkerPool {
        /// Pool builder message.
        reason: String,
    },

    /// Raster decoding or stacking failed.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Weather table or statistics were inconsistent.
    #[error(transparent)]
    Weather(#[from] WeatherError),

    /// Smoothing or interpolation rejected a series.
    #[error(transparent)]
    Smooth(#[from] SmoothError),

    /// A date could not be parsed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl ArdError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArdError::EmptyResult => ErrorKind::EmptyResult,
            _ => ErrorKind::Data,
        }
    }
}
