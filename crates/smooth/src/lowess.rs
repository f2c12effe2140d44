//! Locally weighted scatterplot smoothing.
//!
//! Each fitted value is a weighted linear regression over the `k` nearest
//! neighbours of its abscissa, `k = floor(frac * n)` clamped to `[2, n]`.
//! Neighbour weights are tricube in distance relative to the farthest
//! neighbour. Robustness iterations reweight by the bisquare of residuals
//! scaled by six median absolute residuals.

use canopy_stats::median;

use crate::config::LowessConfig;
use crate::error::SmoothError;

/// Smooths `y` against ascending `x`.
///
/// Equal abscissae are allowed. Returns one fitted value per input point.
///
/// # Errors
///
/// - [`SmoothError::InvalidConfig`] if the configuration is invalid.
/// - [`SmoothError::EmptyInput`] if `x` is empty.
/// - [`SmoothError::LengthMismatch`] if `x` and `y` differ in length.
/// - [`SmoothError::NonFiniteInput`] if either input holds NaN or infinity.
/// - [`SmoothError::Unsorted`] if `x` decreases anywhere.
///
/// # Example
///
/// ```
/// use canopy_smooth::{LowessConfig, lowess};
///
/// let x: Vec<f64> = (0..10).map(f64::from).collect();
/// let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
/// let fitted = lowess(&x, &y, &LowessConfig::default().with_frac(0.5)).unwrap();
/// assert!((fitted[4] - 9.0).abs() < 1e-9);
/// ```
pub fn lowess(x: &[f64], y: &[f64], config: &LowessConfig) -> Result<Vec<f64>, SmoothError> {
    config.validate()?;
    let n = x.len();
    if n == 0 {
        return Err(SmoothError::EmptyInput);
    }
    if y.len() != n {
        return Err(SmoothError::LengthMismatch {
            field: "y",
            expected: n,
            got: y.len(),
        });
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(SmoothError::NonFiniteInput { field: "x" });
    }
    if y.iter().any(|v| !v.is_finite()) {
        return Err(SmoothError::NonFiniteInput { field: "y" });
    }
    if let Some(index) = (1..n).find(|&i| x[i] < x[i - 1]) {
        return Err(SmoothError::Unsorted { index });
    }
    if n == 1 {
        return Ok(y.to_vec());
    }

    let k = neighbourhood_size(config.frac(), n);
    let mut robustness = vec![1.0; n];
    let mut fitted = fit_pass(x, y, &robustness, k);

    for _ in 0..config.iterations() {
        if !update_robustness(y, &fitted, &mut robustness) {
            break;
        }
        fitted = fit_pass(x, y, &robustness, k);
    }
    Ok(fitted)
}

fn neighbourhood_size(frac: f64, n: usize) -> usize {
    let k = (frac * n as f64 + 1e-10).floor() as usize;
    k.clamp(2, n)
}

fn fit_pass(x: &[f64], y: &[f64], robustness: &[f64], k: usize) -> Vec<f64> {
    let n = x.len();
    let mut fitted = Vec::with_capacity(n);
    let mut left = 0;
    let mut right = k - 1;
    let mut weights = vec![0.0; k];

    for i in 0..n {
        let xi = x[i];
        while right + 1 < n && xi - x[left] > x[right + 1] - xi {
            left += 1;
            right += 1;
        }
        let radius = (xi - x[left]).max(x[right] - xi);

        let mut total = 0.0;
        for (w, j) in weights.iter_mut().zip(left..=right) {
            let base = if radius > 0.0 {
                tricube((x[j] - xi).abs() / radius)
            } else {
                1.0
            };
            *w = base * robustness[j];
            total += *w;
        }

        if total <= 0.0 {
            fitted.push(y[i]);
            continue;
        }
        fitted.push(weighted_line_at(&x[left..=right], &y[left..=right], &weights, total, xi));
    }
    fitted
}

fn tricube(u: f64) -> f64 {
    if u <= 0.001 {
        1.0
    } else if u <= 0.999 {
        let t = 1.0 - u * u * u;
        t * t * t
    } else {
        0.0
    }
}

/// Weighted least-squares line through the neighbourhood, evaluated at `at`.
/// Falls back to the weighted mean when the abscissae carry no spread.
fn weighted_line_at(x: &[f64], y: &[f64], weights: &[f64], total: f64, at: f64) -> f64 {
    let mut x_mean = 0.0;
    let mut y_mean = 0.0;
    for ((&xj, &yj), &w) in x.iter().zip(y).zip(weights) {
        x_mean += w * xj;
        y_mean += w * yj;
    }
    x_mean /= total;
    y_mean /= total;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for ((&xj, &yj), &w) in x.iter().zip(y).zip(weights) {
        let dx = xj - x_mean;
        sxx += w * dx * dx;
        sxy += w * dx * (yj - y_mean);
    }

    let span = x[x.len() - 1] - x[0];
    if sxx <= 1e-12 * (span * span).max(f64::MIN_POSITIVE) * total {
        return y_mean;
    }
    y_mean + (sxy / sxx) * (at - x_mean)
}

/// Recomputes bisquare robustness weights. Returns `false` when residuals are
/// already negligible and further iterations would not change the fit.
fn update_robustness(y: &[f64], fitted: &[f64], robustness: &mut [f64]) -> bool {
    let mut abs_res: Vec<f64> = y.iter().zip(fitted).map(|(a, b)| (a - b).abs()).collect();
    let residuals = abs_res.clone();
    abs_res.sort_by(f64::total_cmp);
    let scale = 6.0 * median(&abs_res);
    if scale <= 1e-12 {
        return false;
    }
    for (w, r) in robustness.iter_mut().zip(&residuals) {
        let u = r / scale;
        *w = if u < 1.0 {
            let t = 1.0 - u * u;
            t * t
        } else {
            0.0
        };
    }
    true
}
