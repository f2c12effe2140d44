//! Windowed samples and their quality flags.

use canopy_raster::Pixel;
use canopy_stats::{nan_max_abs, no_nan};
use ndarray::Array2;

/// Data-quality flags of one sample. Each flag is `true` when the check
/// passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityFlags {
    /// Input vegetation values contain no NaN.
    pub nan_input_evi: bool,
    /// Input weather contains no NaN.
    pub nan_input_w: bool,
    /// Output vegetation values contain no NaN.
    pub nan_output_evi: bool,
    /// Forecast weather contains no NaN.
    pub nan_output_w: bool,
    /// Every non-NaN input vegetation value has `|v| <= 1`.
    pub input_evi_le1: bool,
    /// Every non-NaN output vegetation value has `|v| <= 1`.
    pub output_evi_le1: bool,
}

impl QualityFlags {
    /// Evaluates the flags of a sample's four tensors.
    pub fn evaluate(
        input_evi: &[f64],
        input_weather: &Array2<f64>,
        output_evi: &[f64],
        forecast_weather: &Array2<f64>,
    ) -> Self {
        let le1 = |v: &[f64]| nan_max_abs(v).is_some_and(|m| m <= 1.0);
        Self {
            nan_input_evi: no_nan(input_evi),
            nan_input_w: !input_weather.iter().any(|v| v.is_nan()),
            nan_output_evi: no_nan(output_evi),
            nan_output_w: !forecast_weather.iter().any(|v| v.is_nan()),
            input_evi_le1: le1(input_evi),
            output_evi_le1: le1(output_evi),
        }
    }

    /// `true` when every flag passes.
    pub fn all(&self) -> bool {
        self.nan_input_evi
            && self.nan_input_w
            && self.nan_output_evi
            && self.nan_output_w
            && self.input_evi_le1
            && self.output_evi_le1
    }
}

/// One (pixel, window) row of the ARD.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedSample {
    /// Grid row of the source pixel.
    pub row: usize,
    /// Grid column of the source pixel.
    pub col: usize,
    /// Y coordinate of the pixel centre.
    pub lat: f64,
    /// X coordinate of the pixel centre.
    pub long: f64,
    /// Window index counted from the reference date.
    pub window: i64,
    /// Vegetation values of the input days.
    pub input_evi: Vec<f64>,
    /// Normalized weather of the input days, `(input_days, params)`.
    pub input_weather: Array2<f64>,
    /// Vegetation values of the output days.
    pub output_evi: Vec<f64>,
    /// Normalized weather of the output days, `(output_days, params)`.
    pub forecast_weather: Array2<f64>,
    /// Data-quality flags.
    pub flags: QualityFlags,
}

impl WindowedSample {
    /// Creates a sample and evaluates its flags.
    pub fn new(
        pixel: &Pixel,
        window: i64,
        input_evi: Vec<f64>,
        input_weather: Array2<f64>,
        output_evi: Vec<f64>,
        forecast_weather: Array2<f64>,
    ) -> Self {
        let flags = QualityFlags::evaluate(&input_evi, &input_weather, &output_evi, &forecast_weather);
        Self {
            row: pixel.row,
            col: pixel.col,
            lat: pixel.lat,
            long: pixel.long,
            window,
            input_evi,
            input_weather,
            output_evi,
            forecast_weather,
            flags,
        }
    }

    /// `true` when all six quality flags pass.
    pub fn is_clean(&self) -> bool {
        self.flags.all()
    }
}
