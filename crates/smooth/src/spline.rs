//! Not-a-knot cubic spline interpolation.
//!
//! The spline is stored by its knot values and second derivatives `m`. With
//! four or more knots the third derivative is continuous across the second
//! and penultimate knots (not-a-knot), which reduces to a tridiagonal system
//! in `m[1..n-1]`. Three knots give the interpolating parabola, two a line,
//! one a constant.

use crate::error::SmoothError;

/// A fitted cubic spline.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    /// Fits a spline through the knots `(x[i], y[i])`.
    ///
    /// # Errors
    ///
    /// - [`SmoothError::EmptyInput`] if there are no knots.
    /// - [`SmoothError::LengthMismatch`] if `x` and `y` differ in length.
    /// - [`SmoothError::NonFiniteInput`] if a knot is NaN or infinite.
    /// - [`SmoothError::Unsorted`] / [`SmoothError::DuplicateKnot`] if `x` is
    ///   not strictly increasing.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self, SmoothError> {
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
        for i in 1..n {
            if x[i] < x[i - 1] {
                return Err(SmoothError::Unsorted { index: i });
            }
            if x[i] == x[i - 1] {
                return Err(SmoothError::DuplicateKnot { index: i });
            }
        }

        let m = match n {
            1 | 2 => vec![0.0; n],
            3 => parabola_curvature(x, y),
            _ => not_a_knot_curvature(x, y),
        };
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`; a fitted spline has at least one knot.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Evaluates the spline at `t`. Outside the knot range the first or last
    /// cubic piece is extended.
    pub fn evaluate(&self, t: f64) -> f64 {
        let n = self.x.len();
        if n == 1 {
            return self.y[0];
        }
        let seg = self
            .x
            .partition_point(|&k| k <= t)
            .saturating_sub(1)
            .min(n - 2);

        let (x0, x1) = (self.x[seg], self.x[seg + 1]);
        let (y0, y1) = (self.y[seg], self.y[seg + 1]);
        let (m0, m1) = (self.m[seg], self.m[seg + 1]);
        let h = x1 - x0;
        let a = x1 - t;
        let b = t - x0;

        m0 * a * a * a / (6.0 * h)
            + m1 * b * b * b / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}

fn rhs(x: &[f64], y: &[f64], i: usize) -> f64 {
    let h_prev = x[i] - x[i - 1];
    let h_next = x[i + 1] - x[i];
    6.0 * ((y[i + 1] - y[i]) / h_next - (y[i] - y[i - 1]) / h_prev)
}

fn parabola_curvature(x: &[f64], y: &[f64]) -> Vec<f64> {
    let c = rhs(x, y, 1) / (3.0 * (x[2] - x[0]));
    vec![c; 3]
}

fn not_a_knot_curvature(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let size = n - 2;

    let mut sub = vec![0.0; size];
    let mut diag = vec![0.0; size];
    let mut sup = vec![0.0; size];
    let mut r = vec![0.0; size];

    for row in 0..size {
        let i = row + 1;
        sub[row] = h[i - 1];
        diag[row] = 2.0 * (h[i - 1] + h[i]);
        sup[row] = h[i];
        r[row] = rhs(x, y, i);
    }

    // m[0] = m[1] (1 + h0/h1) - m[2] h0/h1
    let (h0, h1) = (h[0], h[1]);
    diag[0] = 3.0 * h0 + 2.0 * h1 + h0 * h0 / h1;
    sup[0] = h1 - h0 * h0 / h1;
    sub[0] = 0.0;

    // m[n-1] = m[n-2] (1 + hb/ha) - m[n-3] hb/ha
    let (ha, hb) = (h[n - 3], h[n - 2]);
    let last = size - 1;
    diag[last] = 2.0 * ha + 3.0 * hb + hb * hb / ha;
    sub[last] = ha - hb * hb / ha;
    sup[last] = 0.0;

    let inner = solve_tridiagonal(&sub, &diag, &sup, &r);

    let mut m = Vec::with_capacity(n);
    m.push(inner[0] * (1.0 + h0 / h1) - inner[1] * h0 / h1);
    m.extend_from_slice(&inner);
    m.push(inner[size - 1] * (1.0 + hb / ha) - inner[size - 2] * hb / ha);
    m
}

/// Thomas algorithm for a tridiagonal system. `sub[0]` and `sup[n-1]` are
/// ignored.
fn solve_tridiagonal(sub: &[f64], diag: &[f64], sup: &[f64], r: &[f64]) -> Vec<f64> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];

    c[0] = sup[0] / diag[0];
    d[0] = r[0] / diag[0];
    for i in 1..n {
        let denom = diag[i] - sub[i] * c[i - 1];
        c[i] = if i + 1 < n { sup[i] / denom } else { 0.0 };
        d[i] = (r[i] - sub[i] * d[i - 1]) / denom;
    }

    let mut out = vec![0.0; n];
    out[n - 1] = d[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = d[i] - c[i] * out[i + 1];
    }
    out
}
