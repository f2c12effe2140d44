//! Weather normalization statistics.

use canopy_stats::{finite_values, nan_mean, nan_sd};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WeatherError;
use crate::table::WeatherTable;

/// Lower bound applied to standard deviations before dividing.
pub const STD_FLOOR: f64 = 0.001;

/// Per-parameter mean and sample standard deviation, computed once over
/// the training boundaries and applied unchanged everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherStats {
    params: Vec<String>,
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl WeatherStats {
    /// Creates statistics aligned with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::StatsLength`] if the vectors differ in length.
    pub fn new(params: Vec<String>, mean: Vec<f64>, std: Vec<f64>) -> Result<Self, WeatherError> {
        let stats = Self { params, mean, std };
        stats.validate()?;
        Ok(stats)
    }

    /// Computes NaN-skipping mean and sample SD (N-1) of each parameter over
    /// all rows of all tables.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::MissingParameter`] if a table lacks a parameter.
    /// - [`WeatherError::InsufficientData`] if a parameter has fewer than two
    ///   finite values.
    #[tracing::instrument(skip_all, fields(n_tables = tables.len(), n_params = params.len()))]
    pub fn from_tables(tables: &[&WeatherTable], params: &[String]) -> Result<Self, WeatherError> {
        let mut mean = Vec::with_capacity(params.len());
        let mut std = Vec::with_capacity(params.len());

        for param in params {
            let mut pooled = Vec::new();
            for table in tables {
                let column = table
                    .column(param)
                    .ok_or_else(|| WeatherError::MissingParameter {
                        param: param.clone(),
                    })?;
                pooled.extend(column.iter().copied());
            }
            let insufficient = || WeatherError::InsufficientData {
                param: param.clone(),
                count: finite_values(&pooled).len(),
            };
            let m = nan_mean(&pooled).ok_or_else(insufficient)?;
            let s = nan_sd(&pooled).ok_or_else(insufficient)?;
            debug!(param = %param, mean = m, std = s, "weather statistics");
            mean.push(m);
            std.push(s);
        }

        Ok(Self {
            params: params.to_vec(),
            mean,
            std,
        })
    }

    /// Parameter names, in vector-component order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Means aligned with [`params`](Self::params).
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Standard deviations aligned with [`params`](Self::params).
    pub fn std(&self) -> &[f64] {
        &self.std
    }

    /// Checks that the vectors are aligned. Deserialized statistics should be
    /// validated before use.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::StatsLength`] on misalignment.
    pub fn validate(&self) -> Result<(), WeatherError> {
        if self.mean.len() != self.params.len() || self.std.len() != self.params.len() {
            return Err(WeatherError::StatsLength {
                params: self.params.len(),
                means: self.mean.len(),
                stds: self.std.len(),
            });
        }
        Ok(())
    }

    /// Returns the statistics' parameters of `table` as z-scores,
    /// `(value - mean) / max(std, floor)`. NaN stays NaN.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::StatsLength`] if the statistics are misaligned.
    /// - [`WeatherError::MissingParameter`] if the table lacks a parameter.
    pub fn normalize(&self, table: &WeatherTable, floor: f64) -> Result<WeatherTable, WeatherError> {
        self.validate()?;
        let selected = table.select(&self.params)?;
        let mut values = selected.values().clone();
        for (j, mut column) in values.columns_mut().into_iter().enumerate() {
            let mean = self.mean[j];
            let sd = self.std[j].max(floor);
            column.mapv_inplace(|v| (v - mean) / sd);
        }
        WeatherTable::new(selected.dates().to_vec(), self.params.clone(), values)
    }
}
