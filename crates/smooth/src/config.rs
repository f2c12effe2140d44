//! Configuration for smoothing and gap filling.

use crate::error::SmoothError;

/// Configuration for [`lowess`](crate::lowess).
///
/// # Example
///
/// ```
/// use canopy_smooth::LowessConfig;
///
/// let config = LowessConfig::default().with_frac(0.3).with_iterations(2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LowessConfig {
    /// Fraction of points in each local neighbourhood.
    frac: f64,
    /// Number of bisquare robustness iterations after the initial fit.
    iterations: usize,
}

impl LowessConfig {
    /// Creates a configuration. Defaults: `frac = 0.2`, `iterations = 0`.
    pub fn new() -> Self {
        Self {
            frac: 0.2,
            iterations: 0,
        }
    }

    /// Sets the neighbourhood fraction.
    pub fn with_frac(mut self, frac: f64) -> Self {
        self.frac = frac;
        self
    }

    /// Sets the number of robustness iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Returns the neighbourhood fraction.
    pub fn frac(&self) -> f64 {
        self.frac
    }

    /// Returns the number of robustness iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SmoothError::InvalidConfig`] if `frac` is not in `(0, 1]`.
    pub fn validate(&self) -> Result<(), SmoothError> {
        if !self.frac.is_finite() || self.frac <= 0.0 || self.frac > 1.0 {
            return Err(SmoothError::InvalidConfig {
                reason: format!("frac must be in (0, 1], got {}", self.frac),
            });
        }
        Ok(())
    }
}

impl Default for LowessConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for [`fill_gaps`](crate::fill_gaps).
#[derive(Debug, Clone, PartialEq)]
pub struct GapFillConfig {
    /// Maximum distance, in samples, from the nearest observation.
    limit: usize,
    /// Whether to fill before the first and after the last observation.
    extrapolate: bool,
}

impl GapFillConfig {
    /// Creates a configuration. Defaults: `limit = 100`, `extrapolate = true`.
    pub fn new() -> Self {
        Self {
            limit: 100,
            extrapolate: true,
        }
    }

    /// Sets the fill limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Enables or disables filling outside the observed range.
    pub fn with_extrapolate(mut self, extrapolate: bool) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    /// Returns the fill limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns whether the ends are extrapolated.
    pub fn extrapolate(&self) -> bool {
        self.extrapolate
    }
}

impl Default for GapFillConfig {
    fn default() -> Self {
        Self::new()
    }
}
