//! Error types for the canopy-raster crate.

use std::path::PathBuf;

use chrono::NaiveDate;

/// Error type for all fallible operations in the canopy-raster crate.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Returned when a raster file cannot be opened.
    #[error("cannot open raster {}: {source}", path.display())]
    Open {
        /// Path of the raster.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when the TIFF decoder rejects a file.
    #[error("cannot decode raster {}: {reason}", path.display())]
    Decode {
        /// Path of the raster.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// Returned when the sample type has no numeric interpretation.
    #[error("unsupported sample format in {}", path.display())]
    UnsupportedSampleFormat {
        /// Path of the raster.
        path: PathBuf,
    },

    /// Returned when a raster carries no usable georeference.
    #[error("raster {} has no georeference: {reason}", path.display())]
    MissingGeoreference {
        /// Path of the raster.
        path: PathBuf,
        /// What was missing or malformed.
        reason: String,
    },

    /// Returned when scenes do not share one pixel grid.
    #[error("scene {date} is not co-registered with the first scene: {reason}")]
    GridMismatch {
        /// Acquisition date of the offending scene.
        date: NaiveDate,
        /// Which property differs.
        reason: String,
    },

    /// Returned when two scenes share an acquisition date.
    #[error("duplicate scene date {date}")]
    DuplicateDate {
        /// The repeated date.
        date: NaiveDate,
    },

    /// Returned when a stack is built from no scenes.
    #[error("scene stack is empty")]
    EmptyStack,

    /// Returned when a subsampling stride is zero.
    #[error("stride must be >= 1, got {stride}")]
    InvalidStride {
        /// The invalid stride.
        stride: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn error_decode() {
        let e = RasterError::Decode {
            path: PathBuf::from("a.tif"),
            reason: "bad magic".to_string(),
        };
        assert_eq!(e.to_string(), "cannot decode raster a.tif: bad magic");
    }

    #[test]
    fn error_missing_georeference() {
        let e = RasterError::MissingGeoreference {
            path: PathBuf::from("b.tif"),
            reason: "no ModelPixelScale tag".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "raster b.tif has no georeference: no ModelPixelScale tag"
        );
    }

    #[test]
    fn error_grid_mismatch() {
        let e = RasterError::GridMismatch {
            date: date("2021-03-04"),
            reason: "dimensions 3x4 differ from 3x5".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "scene 2021-03-04 is not co-registered with the first scene: dimensions 3x4 differ from 3x5"
        );
    }

    #[test]
    fn error_duplicate_date() {
        let e = RasterError::DuplicateDate {
            date: date("2021-03-04"),
        };
        assert_eq!(e.to_string(), "duplicate scene date 2021-03-04");
    }

    #[test]
    fn error_invalid_stride() {
        assert_eq!(
            RasterError::InvalidStride { stride: 0 }.to_string(),
            "stride must be >= 1, got 0"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<RasterError>();
    }
}
