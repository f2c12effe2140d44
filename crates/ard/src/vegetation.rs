//! Per-pixel daily vegetation curves.

use canopy_calendar::{DateRange, day_offset};
use canopy_raster::PixelSeries;
use canopy_smooth::{GapFillConfig, LowessConfig, fill_gaps, lowess};

use crate::error::ArdError;

/// Smooths a pixel's observations, interpolates them onto the daily
/// `calendar`, and returns the values for each day of `span`.
///
/// Observations outside the calendar are dropped after smoothing. Days of
/// `span` outside the calendar are NaN.
pub(crate) fn daily_vegetation(
    series: &PixelSeries,
    calendar: DateRange,
    span: DateRange,
    lowess_config: &LowessConfig,
    gap_config: &GapFillConfig,
) -> Result<Vec<f64>, ArdError> {
    let Some(&first) = series.dates.first() else {
        return Ok(vec![f64::NAN; span.len()]);
    };
    let x: Vec<f64> = series
        .dates
        .iter()
        .map(|&d| day_offset(d, first) as f64)
        .collect();
    let smoothed = lowess(&x, &series.values, lowess_config)?;

    let mut daily = vec![f64::NAN; calendar.len()];
    for (&date, &value) in series.dates.iter().zip(&smoothed) {
        if let Some(i) = calendar.index_of(date) {
            daily[i] = value;
        }
    }
    let filled = fill_gaps(&daily, gap_config)?;

    Ok(span
        .iter()
        .map(|date| calendar.index_of(date).map_or(f64::NAN, |i| filled[i]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use canopy_calendar::NaiveDate;
    use canopy_raster::Pixel;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, day).unwrap()
    }

    fn series(days: &[u32], values: &[f64]) -> PixelSeries {
        PixelSeries {
            pixel: Pixel {
                row: 0,
                col: 0,
                lat: 0.0,
                long: 0.0,
            },
            dates: days.iter().map(|&k| d(k)).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn linear_observations_fill_linearly() {
        let s = series(&[1, 5, 9, 13, 17], &[0.1, 0.2, 0.3, 0.4, 0.5]);
        let calendar = DateRange::new(d(1), d(20)).unwrap();
        let span = DateRange::new(d(1), d(20)).unwrap();
        let out = daily_vegetation(
            &s,
            calendar,
            span,
            &LowessConfig::default(),
            &GapFillConfig::default(),
        )
        .unwrap();
        assert_eq!(out.len(), 20);
        for (k, v) in out.iter().enumerate() {
            assert_relative_eq!(*v, 0.1 + 0.025 * k as f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn span_outside_calendar_is_nan() {
        let s = series(&[1, 2, 3], &[0.2, 0.2, 0.2]);
        let calendar = DateRange::new(d(1), d(5)).unwrap();
        let span = DateRange::new(d(4), d(8)).unwrap();
        let out = daily_vegetation(
            &s,
            calendar,
            span,
            &LowessConfig::default(),
            &GapFillConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(out[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(out[1], 0.2, epsilon = 1e-12);
        assert!(out[2..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn gap_limit_leaves_far_days_missing() {
        let s = series(&[1, 2], &[0.3, 0.3]);
        let calendar = DateRange::new(d(1), d(10)).unwrap();
        let out = daily_vegetation(
            &s,
            calendar,
            calendar,
            &LowessConfig::default(),
            &GapFillConfig::new().with_limit(3),
        )
        .unwrap();
        assert!(out[4].is_finite());
        assert!(out[5].is_nan());
    }
}
