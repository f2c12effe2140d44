//! Co-registered scene cube.

use chrono::NaiveDate;
use ndarray::{Array3, Axis, s};
use tracing::debug;

use crate::band::Band;
use crate::error::RasterError;
use crate::geo::GeoTransform;
use crate::pixel::{Pixel, PixelSeries};

/// Relative tolerance when comparing scene geotransforms.
const TRANSFORM_REL_TOL: f64 = 1e-9;

/// Scenes of one boundary stacked as `(date, row, col)`, dates ascending.
#[derive(Debug, Clone)]
pub struct SceneStack {
    dates: Vec<NaiveDate>,
    values: Array3<f64>,
    transform: GeoTransform,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl SceneStack {
    /// Stacks dated bands after checking that they share one grid.
    ///
    /// Bands may arrive in any order; the stack is sorted by date.
    ///
    /// # Errors
    ///
    /// - [`RasterError::EmptyStack`] if `bands` is empty.
    /// - [`RasterError::DuplicateDate`] if two bands share a date.
    /// - [`RasterError::GridMismatch`] if dimensions or transforms differ.
    pub fn from_bands(mut bands: Vec<(NaiveDate, Band)>) -> Result<Self, RasterError> {
        if bands.is_empty() {
            return Err(RasterError::EmptyStack);
        }
        bands.sort_by_key(|(date, _)| *date);
        if let Some(pair) = bands.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(RasterError::DuplicateDate { date: pair[1].0 });
        }

        let (rows, cols) = bands[0].1.dim();
        let transform = *bands[0].1.transform();
        for (date, band) in &bands[1..] {
            if band.dim() != (rows, cols) {
                let (r, c) = band.dim();
                return Err(RasterError::GridMismatch {
                    date: *date,
                    reason: format!("dimensions {r}x{c} differ from {rows}x{cols}"),
                });
            }
            if !band.transform().approx_eq(&transform, TRANSFORM_REL_TOL) {
                return Err(RasterError::GridMismatch {
                    date: *date,
                    reason: format!("transform {:?} differs from {:?}", band.transform(), transform),
                });
            }
        }

        let mut dates = Vec::with_capacity(bands.len());
        let mut values = Array3::<f64>::zeros((bands.len(), rows, cols));
        for (i, (date, band)) in bands.into_iter().enumerate() {
            dates.push(date);
            values.index_axis_mut(Axis(0), i).assign(&band.into_data());
        }

        debug!(n_scenes = dates.len(), rows, cols, "stacked scenes");
        Ok(Self {
            dates,
            values,
            transform,
            rows: (0..rows).collect(),
            cols: (0..cols).collect(),
        })
    }

    /// Acquisition dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The `(date, row, col)` cube.
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Shared geotransform of the full-resolution grid.
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Current grid shape as `(rows, cols)`.
    pub fn grid_dim(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    /// Sets every date of a pixel to NaN when the pixel is exactly zero on
    /// all dates. Returns the number of masked pixels.
    pub fn mask_always_zero(&mut self) -> usize {
        let (_, rows, cols) = self.values.dim();
        let mut masked = 0;
        for r in 0..rows {
            for c in 0..cols {
                let mut lane = self.values.slice_mut(s![.., r, c]);
                if lane.iter().all(|&v| v == 0.0) {
                    lane.fill(f64::NAN);
                    masked += 1;
                }
            }
        }
        debug!(masked, "masked always-zero pixels");
        masked
    }

    /// Keeps every `stride`-th row and column, starting at `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidStride`] if `stride` is zero.
    pub fn subsample(&self, stride: usize) -> Result<Self, RasterError> {
        if stride == 0 {
            return Err(RasterError::InvalidStride { stride });
        }
        let step = stride as isize;
        Ok(Self {
            dates: self.dates.clone(),
            values: self.values.slice(s![.., ..;step, ..;step]).to_owned(),
            transform: self.transform,
            rows: self.rows.iter().copied().step_by(stride).collect(),
            cols: self.cols.iter().copied().step_by(stride).collect(),
        })
    }

    /// Extracts the finite observations of every pixel in row-major order,
    /// skipping pixels with none.
    pub fn pixel_series(&self) -> Vec<PixelSeries> {
        let mut out = Vec::new();
        for (ri, &row) in self.rows.iter().enumerate() {
            for (ci, &col) in self.cols.iter().enumerate() {
                let lane = self.values.slice(s![.., ri, ci]);
                let mut dates = Vec::new();
                let mut values = Vec::new();
                for (date, &v) in self.dates.iter().zip(lane.iter()) {
                    if v.is_finite() {
                        dates.push(*date);
                        values.push(v);
                    }
                }
                if dates.is_empty() {
                    continue;
                }
                let (lat, long) = self.transform.pixel_center(row, col);
                out.push(PixelSeries {
                    pixel: Pixel { row, col, lat, long },
                    dates,
                    values,
                });
            }
        }
        out
    }
}
