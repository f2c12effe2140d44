//! The ARD table.

use std::collections::BTreeSet;

use crate::error::ArdError;
use crate::sample::WindowedSample;
use crate::tensor::ArdTensors;

/// Counts of samples failing each quality flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityReport {
    /// Number of samples.
    pub rows: usize,
    /// Samples passing every flag.
    pub clean: usize,
    /// Samples with NaN input vegetation.
    pub nan_input_evi: usize,
    /// Samples with NaN input weather.
    pub nan_input_w: usize,
    /// Samples with NaN output vegetation.
    pub nan_output_evi: usize,
    /// Samples with NaN forecast weather.
    pub nan_output_w: usize,
    /// Samples with input vegetation outside `[-1, 1]`.
    pub input_evi_le1: usize,
    /// Samples with output vegetation outside `[-1, 1]`.
    pub output_evi_le1: usize,
}

impl QualityReport {
    /// `true` if any sample fails a flag.
    pub fn has_failures(&self) -> bool {
        self.clean < self.rows
    }
}

/// Windowed samples of one boundary, sorted by `(row, col, window)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArdTable {
    variable_name: String,
    input_days: usize,
    output_days: usize,
    weather_params: Vec<String>,
    samples: Vec<WindowedSample>,
}

impl ArdTable {
    /// Creates a table, sorting samples by `(row, col, window)`.
    pub fn new(
        variable_name: impl Into<String>,
        input_days: usize,
        output_days: usize,
        weather_params: Vec<String>,
        mut samples: Vec<WindowedSample>,
    ) -> Self {
        samples.sort_by_key(|s| (s.row, s.col, s.window));
        Self {
            variable_name: variable_name.into(),
            input_days,
            output_days,
            weather_params,
            samples,
        }
    }

    /// Name of the vegetation variable.
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    /// Input window length in days.
    pub fn input_days(&self) -> usize {
        self.input_days
    }

    /// Output window length in days.
    pub fn output_days(&self) -> usize {
        self.output_days
    }

    /// Weather parameters in vector-component order.
    pub fn weather_params(&self) -> &[String] {
        &self.weather_params
    }

    /// The samples.
    pub fn samples(&self) -> &[WindowedSample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` if the table holds no sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct window indices, ascending.
    pub fn windows(&self) -> BTreeSet<i64> {
        self.samples.iter().map(|s| s.window).collect()
    }

    /// Returns the table unchanged, or [`ArdError::EmptyResult`] if it is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`ArdError::EmptyResult`] for an empty table.
    pub fn require_non_empty(self) -> Result<Self, ArdError> {
        if self.is_empty() {
            return Err(ArdError::EmptyResult);
        }
        Ok(self)
    }

    /// Samples passing all six quality flags.
    pub fn clean(&self) -> ArdTable {
        Self {
            variable_name: self.variable_name.clone(),
            input_days: self.input_days,
            output_days: self.output_days,
            weather_params: self.weather_params.clone(),
            samples: self.samples.iter().filter(|s| s.is_clean()).cloned().collect(),
        }
    }

    /// Counts flag failures.
    pub fn quality_report(&self) -> QualityReport {
        let mut report = QualityReport {
            rows: self.samples.len(),
            ..QualityReport::default()
        };
        for s in &self.samples {
            let f = &s.flags;
            report.clean += usize::from(f.all());
            report.nan_input_evi += usize::from(!f.nan_input_evi);
            report.nan_input_w += usize::from(!f.nan_input_w);
            report.nan_output_evi += usize::from(!f.nan_output_evi);
            report.nan_output_w += usize::from(!f.nan_output_w);
            report.input_evi_le1 += usize::from(!f.input_evi_le1);
            report.output_evi_le1 += usize::from(!f.output_evi_le1);
        }
        report
    }

    /// Dense tensors of all samples, in table order.
    ///
    /// # Errors
    ///
    /// [`ArdError::SampleShape`] if a sample does not match the table's
    /// window lengths and parameter count.
    pub fn tensors(&self) -> Result<ArdTensors, ArdError> {
        ArdTensors::from_samples(
            &self.samples,
            self.input_days,
            self.output_days,
            self.weather_params.len(),
        )
    }
}
