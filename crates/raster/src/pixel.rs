//! Pixel identity and per-pixel observed series.

use chrono::NaiveDate;

/// A grid cell of the source raster.
///
/// `row` and `col` index the full-resolution grid, also after subsampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
    /// Y coordinate of the pixel centre.
    pub lat: f64,
    /// X coordinate of the pixel centre.
    pub long: f64,
}

/// Finite observations of one pixel, ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSeries {
    /// The observed pixel.
    pub pixel: Pixel,
    /// Acquisition dates with a finite value, ascending.
    pub dates: Vec<NaiveDate>,
    /// Values aligned with `dates`.
    pub values: Vec<f64>,
}

impl PixelSeries {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// `true` if the pixel has no observation.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
