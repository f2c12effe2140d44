//! Statistical helper functions for the Canopy ARD builder.
//!
//! The `nan_*` variants skip NaN and infinite entries, the way tabular
//! weather exports are summarised column by column.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Finite entries of `data`, in order.
pub fn finite_values(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Mean over the finite entries. Returns `None` if there are none.
pub fn nan_mean(data: &[f64]) -> Option<f64> {
    let finite = finite_values(data);
    if finite.is_empty() {
        None
    } else {
        Some(mean(&finite))
    }
}

/// Sample standard deviation (N-1) over the finite entries.
/// Returns `None` if fewer than 2 finite entries.
pub fn nan_sd(data: &[f64]) -> Option<f64> {
    let finite = finite_values(data);
    if finite.len() < 2 {
        None
    } else {
        Some(sd(&finite))
    }
}

/// Returns `true` if no entry is NaN.
pub fn no_nan(data: &[f64]) -> bool {
    !data.iter().any(|v| v.is_nan())
}

/// Largest absolute value among the non-NaN entries.
/// Returns `None` if every entry is NaN (or the slice is empty).
pub fn nan_max_abs(data: &[f64]) -> Option<f64> {
    data.iter()
        .filter(|v| !v.is_nan())
        .map(|v| v.abs())
        .fold(None, |acc, v| match acc {
            Some(m) if m >= v => Some(m),
            _ => Some(v),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_sd_single() {
        assert_eq!(sd(&[5.0]), 0.0);
    }

    #[test]
    fn test_variance_two() {
        // [3.0, 7.0]: mean=5, sum_sq=8, var=8/1=8
        assert_relative_eq!(variance(&[3.0, 7.0]), 8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_median_odd() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0]), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_median_even() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5, epsilon = 1e-6);
    }

    #[test]
    #[should_panic(expected = "median: input must not be empty")]
    fn test_median_empty_panics() {
        median(&[]);
    }

    #[test]
    fn test_nan_mean_skips_missing() {
        let data = [1.0, f64::NAN, 3.0, f64::INFINITY];
        assert_relative_eq!(nan_mean(&data).unwrap(), 2.0, epsilon = 1e-12);
        assert!(nan_mean(&[f64::NAN]).is_none());
        assert!(nan_mean(&[]).is_none());
    }

    #[test]
    fn test_nan_sd_skips_missing() {
        let data = [3.0, f64::NAN, 7.0];
        assert_relative_eq!(nan_sd(&data).unwrap(), 8.0_f64.sqrt(), epsilon = 1e-12);
        assert!(nan_sd(&[1.0, f64::NAN]).is_none());
    }

    #[test]
    fn test_nan_sd_constant_is_zero() {
        assert_eq!(nan_sd(&[4.0, 4.0, 4.0]), Some(0.0));
    }

    #[test]
    fn test_no_nan() {
        assert!(no_nan(&[0.0, -1.0, 2.0]));
        assert!(no_nan(&[]));
        assert!(!no_nan(&[0.0, f64::NAN]));
    }

    #[test]
    fn test_nan_max_abs() {
        assert_eq!(nan_max_abs(&[0.2, -0.9, 0.5]), Some(0.9));
        assert_eq!(nan_max_abs(&[f64::NAN, -1.5]), Some(1.5));
        assert_eq!(nan_max_abs(&[f64::NAN, f64::NAN]), None);
        assert_eq!(nan_max_abs(&[]), None);
    }
}
