//! Dense tensors for the forecasting model.

use ndarray::{Array3, s};

use crate::error::ArdError;
use crate::sample::WindowedSample;

/// The four model inputs/targets stacked over samples.
///
/// Shapes: `input_evi (n, input_days, 1)`, `input_weather (n, input_days, p)`,
/// `forecast_weather (n, output_days, p)`, `output_evi (n, output_days, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArdTensors {
    /// Input vegetation values.
    pub input_evi: Array3<f64>,
    /// Input weather vectors.
    pub input_weather: Array3<f64>,
    /// Forecast weather vectors.
    pub forecast_weather: Array3<f64>,
    /// Target vegetation values.
    pub output_evi: Array3<f64>,
}

impl ArdTensors {
    /// Stacks samples that share the given window lengths and parameter
    /// count.
    ///
    /// # Errors
    ///
    /// [`ArdError::SampleShape`] if a sample's vegetation lengths or weather
    /// dimensions differ from `input_days`, `output_days` and `n_params`.
    pub fn from_samples<'a>(
        samples: impl IntoIterator<Item = &'a WindowedSample>,
        input_days: usize,
        output_days: usize,
        n_params: usize,
    ) -> Result<Self, ArdError> {
        let samples: Vec<&WindowedSample> = samples.into_iter().collect();
        for sample in &samples {
            check_shape(sample, input_days, output_days, n_params)?;
        }

        let n = samples.len();
        let mut out = Self {
            input_evi: Array3::zeros((n, input_days, 1)),
            input_weather: Array3::zeros((n, input_days, n_params)),
            forecast_weather: Array3::zeros((n, output_days, n_params)),
            output_evi: Array3::zeros((n, output_days, 1)),
        };
        for (i, sample) in samples.iter().enumerate() {
            for (t, &v) in sample.input_evi.iter().enumerate() {
                out.input_evi[[i, t, 0]] = v;
            }
            for (t, &v) in sample.output_evi.iter().enumerate() {
                out.output_evi[[i, t, 0]] = v;
            }
            out.input_weather
                .slice_mut(s![i, .., ..])
                .assign(&sample.input_weather);
            out.forecast_weather
                .slice_mut(s![i, .., ..])
                .assign(&sample.forecast_weather);
        }
        Ok(out)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.input_evi.len_of(ndarray::Axis(0))
    }

    /// `true` if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn check_shape(
    sample: &WindowedSample,
    input_days: usize,
    output_days: usize,
    n_params: usize,
) -> Result<(), ArdError> {
    let mismatch = |reason: String| ArdError::SampleShape {
        row: sample.row,
        col: sample.col,
        window: sample.window,
        reason,
    };
    if sample.input_evi.len() != input_days {
        return Err(mismatch(format!(
            "input_evi has {} values, expected {input_days}",
            sample.input_evi.len()
        )));
    }
    if sample.output_evi.len() != output_days {
        return Err(mismatch(format!(
            "output_evi has {} values, expected {output_days}",
            sample.output_evi.len()
        )));
    }
    if sample.input_weather.dim() != (input_days, n_params) {
        return Err(mismatch(format!(
            "input_weather is {:?}, expected ({input_days}, {n_params})",
            sample.input_weather.dim()
        )));
    }
    if sample.forecast_weather.dim() != (output_days, n_params) {
        return Err(mismatch(format!(
            "forecast_weather is {:?}, expected ({output_days}, {n_params})",
            sample.forecast_weather.dim()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_raster::Pixel;
    use ndarray::array;

    #[test]
    fn shapes_and_values() {
        let pixel = Pixel {
            row: 0,
            col: 0,
            lat: 0.0,
            long: 0.0,
        };
        let a = WindowedSample::new(
            &pixel,
            0,
            vec![0.1, 0.2],
            array![[1.0, 2.0], [3.0, 4.0]],
            vec![0.3],
            array![[5.0, 6.0]],
        );
        let t = ArdTensors::from_samples([&a, &a], 2, 1, 2).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.input_evi.dim(), (2, 2, 1));
        assert_eq!(t.input_weather.dim(), (2, 2, 2));
        assert_eq!(t.forecast_weather.dim(), (2, 1, 2));
        assert_eq!(t.output_evi.dim(), (2, 1, 1));
        assert_eq!(t.input_evi[[1, 1, 0]], 0.2);
        assert_eq!(t.input_weather[[0, 1, 0]], 3.0);
        assert_eq!(t.forecast_weather[[1, 0, 1]], 6.0);
        assert_eq!(t.output_evi[[0, 0, 0]], 0.3);
    }

    #[test]
    fn empty_is_zero_length() {
        let t = ArdTensors::from_samples(std::iter::empty(), 30, 10, 3).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.input_weather.dim(), (0, 30, 3));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let pixel = Pixel {
            row: 4,
            col: 5,
            lat: 0.0,
            long: 0.0,
        };
        let short_input = WindowedSample::new(
            &pixel,
            1,
            vec![0.1],
            array![[1.0, 2.0], [3.0, 4.0]],
            vec![0.3],
            array![[5.0, 6.0]],
        );
        let err = ArdTensors::from_samples([&short_input], 2, 1, 2).unwrap_err();
        assert!(matches!(
            err,
            ArdError::SampleShape { row: 4, col: 5, window: 1, .. }
        ));

        let one_param = WindowedSample::new(
            &pixel,
            1,
            vec![0.1, 0.2],
            array![[1.0], [3.0]],
            vec![0.3],
            array![[5.0]],
        );
        let err = ArdTensors::from_samples([&one_param], 2, 1, 2).unwrap_err();
        assert!(err.to_string().contains("input_weather"));
    }
}
