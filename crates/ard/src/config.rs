//! Configuration for the ARD builder.

use canopy_calendar::{DateRange, NaiveDate, WindowSpec};
use canopy_smooth::{GapFillConfig, LowessConfig};
use canopy_weather::STD_FLOOR;

use crate::error::ArdError;

/// Parameters of one ARD build, shared immutably across boundaries.
///
/// # Example
///
/// ```ignore
/// use canopy_ard::ArdConfig;
/// use canopy_calendar::{DateRange, parse_date, parse_reference_date};
///
/// let calendar = DateRange::new(parse_date("2020-01-01")?, parse_date("2020-12-31")?)?;
/// let config = ArdConfig::new(calendar, parse_reference_date("01-01-2020")?, vec!["temperature-F".into()])
///     .with_variable_name("evi")
///     .with_spatial_stride(2);
/// config.validate()?;
/// ```
#[derive(Debug, Clone)]
pub struct ArdConfig {
    interpolation: DateRange,
    reference_date: NaiveDate,
    weather_params: Vec<String>,
    variable_name: String,
    spatial_stride: usize,
    input_days: u32,
    output_days: u32,
    lowess: LowessConfig,
    gap_fill: GapFillConfig,
    std_floor: f64,
}

impl ArdConfig {
    /// Creates a configuration.
    ///
    /// Defaults: `variable_name = "ndvi"`, `spatial_stride = 1`,
    /// `input_days = 30`, `output_days = 10`, LOWESS `frac = 0.2` with no
    /// robustness iterations, gap limit 100 days with extrapolation,
    /// `std_floor = 0.001`.
    pub fn new(
        interpolation: DateRange,
        reference_date: NaiveDate,
        weather_params: Vec<String>,
    ) -> Self {
        Self {
            interpolation,
            reference_date,
            weather_params,
            variable_name: "ndvi".to_string(),
            spatial_stride: 1,
            input_days: 30,
            output_days: 10,
            lowess: LowessConfig::default(),
            gap_fill: GapFillConfig::default(),
            std_floor: STD_FLOOR,
        }
    }

    /// Sets the name under which the vegetation column is carried.
    pub fn with_variable_name(mut self, name: impl Into<String>) -> Self {
        self.variable_name = name.into();
        self
    }

    /// Sets the spatial subsampling stride.
    pub fn with_spatial_stride(mut self, stride: usize) -> Self {
        self.spatial_stride = stride;
        self
    }

    /// Sets the input window length in days.
    pub fn with_input_days(mut self, days: u32) -> Self {
        self.input_days = days;
        self
    }

    /// Sets the output window length in days.
    pub fn with_output_days(mut self, days: u32) -> Self {
        self.output_days = days;
        self
    }

    /// Sets the LOWESS smoother configuration.
    pub fn with_lowess(mut self, lowess: LowessConfig) -> Self {
        self.lowess = lowess;
        self
    }

    /// Sets the gap-fill configuration.
    pub fn with_gap_fill(mut self, gap_fill: GapFillConfig) -> Self {
        self.gap_fill = gap_fill;
        self
    }

    /// Sets the floor applied to weather standard deviations.
    pub fn with_std_floor(mut self, floor: f64) -> Self {
        self.std_floor = floor;
        self
    }

    /// Daily interpolation calendar.
    pub fn interpolation(&self) -> DateRange {
        self.interpolation
    }

    /// Origin of the window calendar.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Weather parameters in vector-component order.
    pub fn weather_params(&self) -> &[String] {
        &self.weather_params
    }

    /// Name of the vegetation variable.
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    /// Spatial subsampling stride.
    pub fn spatial_stride(&self) -> usize {
        self.spatial_stride
    }

    /// Input window length in days.
    pub fn input_days(&self) -> u32 {
        self.input_days
    }

    /// Output window length in days.
    pub fn output_days(&self) -> u32 {
        self.output_days
    }

    /// LOWESS configuration.
    pub fn lowess(&self) -> &LowessConfig {
        &self.lowess
    }

    /// Gap-fill configuration.
    pub fn gap_fill(&self) -> &GapFillConfig {
        &self.gap_fill
    }

    /// Floor applied to weather standard deviations.
    pub fn std_floor(&self) -> f64 {
        self.std_floor
    }

    /// Window calendar derived from the lengths and reference date.
    ///
    /// # Errors
    ///
    /// Returns [`ArdError::Calendar`] if a window length is zero.
    pub fn window_spec(&self) -> Result<WindowSpec, ArdError> {
        Ok(WindowSpec::new(
            self.input_days,
            self.output_days,
            self.reference_date,
        )?)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArdError::InvalidConfig`] if the stride, window lengths,
    /// parameter list, variable name, or SD floor are out of range, or
    /// [`ArdError::Smooth`] for an invalid LOWESS configuration.
    pub fn validate(&self) -> Result<(), ArdError> {
        let invalid = |reason: String| Err(ArdError::InvalidConfig { reason });
        if self.spatial_stride < 1 {
            return invalid(format!(
                "spatial_stride must be >= 1, got {}",
                self.spatial_stride
            ));
        }
        if self.input_days < 1 || self.output_days < 1 {
            return invalid(format!(
                "window lengths must be >= 1, got input_days={} output_days={}",
                self.input_days, self.output_days
            ));
        }
        if self.weather_params.is_empty() {
            return invalid("weather_params must not be empty".to_string());
        }
        for (i, p) in self.weather_params.iter().enumerate() {
            if self.weather_params[..i].contains(p) {
                return invalid(format!("weather parameter '{p}' is listed twice"));
            }
        }
        if self.variable_name.trim().is_empty() {
            return invalid("variable_name must not be empty".to_string());
        }
        if !self.std_floor.is_finite() || self.std_floor <= 0.0 {
            return invalid(format!(
                "std_floor must be finite and positive, got {}",
                self.std_floor
            ));
        }
        self.lowess.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ArdConfig {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        ArdConfig::new(
            DateRange::new(start, end).unwrap(),
            start,
            vec!["temperature-F".to_string()],
        )
    }

    #[test]
    fn defaults() {
        let c = base();
        assert_eq!(c.variable_name(), "ndvi");
        assert_eq!(c.spatial_stride(), 1);
        assert_eq!(c.input_days(), 30);
        assert_eq!(c.output_days(), 10);
        assert_eq!(c.lowess().frac(), 0.2);
        assert_eq!(c.lowess().iterations(), 0);
        assert_eq!(c.gap_fill().limit(), 100);
        assert_eq!(c.std_floor(), 0.001);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_stride_is_invalid() {
        let err = base().with_spatial_stride(0).validate().unwrap_err();
        assert!(matches!(err, ArdError::InvalidConfig { .. }));
    }

    #[test]
    fn zero_window_is_invalid() {
        assert!(base().with_output_days(0).validate().is_err());
        assert!(base().with_input_days(0).window_spec().is_err());
    }

    #[test]
    fn duplicate_parameter_is_invalid() {
        let mut c = base();
        c.weather_params.push("temperature-F".to_string());
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn non_positive_floor_is_invalid() {
        assert!(base().with_std_floor(0.0).validate().is_err());
    }

    #[test]
    fn bad_lowess_is_invalid() {
        let err = base()
            .with_lowess(LowessConfig::new().with_frac(2.0))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ArdError::Smooth(_)));
    }

    #[test]
    fn window_spec_uses_reference() {
        let c = base().with_input_days(5).with_output_days(2);
        let spec = c.window_spec().unwrap();
        assert_eq!(spec.total_days(), 7);
        assert_eq!(spec.reference(), c.reference_date());
    }
}
