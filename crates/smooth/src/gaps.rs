//! Gap-limited interpolation of uniformly spaced series.

use tracing::trace;

use crate::config::GapFillConfig;
use crate::error::SmoothError;
use crate::spline::CubicSpline;

/// Fills NaN entries of a uniformly spaced series with a cubic spline
/// through the observed entries.
///
/// A missing entry is filled only if its distance, in samples, to the nearest
/// observed entry is at most [`GapFillConfig::limit`]. Entries before the
/// first or after the last observation are filled only when
/// [`GapFillConfig::extrapolate`] is set. A series with no observation is
/// returned unchanged.
///
/// # Errors
///
/// Returns [`SmoothError::NonFiniteInput`] if the series contains an
/// infinite value.
///
/// # Example
///
/// ```
/// use canopy_smooth::{GapFillConfig, fill_gaps};
///
/// let series = [0.0, f64::NAN, 2.0, f64::NAN, f64::NAN, 5.0];
/// let filled = fill_gaps(&series, &GapFillConfig::default()).unwrap();
/// assert!(filled.iter().all(|v| v.is_finite()));
/// ```
pub fn fill_gaps(values: &[f64], config: &GapFillConfig) -> Result<Vec<f64>, SmoothError> {
    if values.iter().any(|v| v.is_infinite()) {
        return Err(SmoothError::NonFiniteInput { field: "values" });
    }

    let observed: Vec<usize> = (0..values.len()).filter(|&i| !values[i].is_nan()).collect();
    let (Some(&first), Some(&last)) = (observed.first(), observed.last()) else {
        return Ok(values.to_vec());
    };

    let knots_x: Vec<f64> = observed.iter().map(|&i| i as f64).collect();
    let knots_y: Vec<f64> = observed.iter().map(|&i| values[i]).collect();
    let spline = CubicSpline::fit(&knots_x, &knots_y)?;

    let distance = distance_to_observed(values);
    let mut filled = values.to_vec();
    let mut n_filled = 0usize;
    for (i, slot) in filled.iter_mut().enumerate() {
        if !slot.is_nan() || distance[i] > config.limit() {
            continue;
        }
        if !config.extrapolate() && (i < first || i > last) {
            continue;
        }
        *slot = spline.evaluate(i as f64);
        n_filled += 1;
    }
    trace!(n = values.len(), n_observed = observed.len(), n_filled, "filled gaps");
    Ok(filled)
}

/// Distance from each index to the nearest non-NaN entry. Requires at least
/// one non-NaN entry.
fn distance_to_observed(values: &[f64]) -> Vec<usize> {
    let n = values.len();
    let mut dist = vec![usize::MAX; n];

    let mut last_seen: Option<usize> = None;
    for i in 0..n {
        if !values[i].is_nan() {
            last_seen = Some(i);
        }
        if let Some(j) = last_seen {
            dist[i] = i - j;
        }
    }

    let mut next_seen: Option<usize> = None;
    for i in (0..n).rev() {
        if !values[i].is_nan() {
            next_seen = Some(i);
        }
        if let Some(j) = next_seen {
            dist[i] = dist[i].min(j - i);
        }
    }
    dist
}
