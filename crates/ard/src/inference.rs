//! Single-boundary inference batches.

use std::collections::BTreeMap;

use canopy_calendar::NaiveDate;
use chrono::Days;
use tracing::warn;

use crate::error::ArdError;
use crate::table::{ArdTable, QualityReport};
use crate::tensor::ArdTensors;

/// An ARD table validated for inference: non-empty, one window per pixel.
#[derive(Debug, Clone)]
pub struct InferenceBatch {
    table: ArdTable,
    tensors: ArdTensors,
    quality: QualityReport,
}

impl InferenceBatch {
    /// Validates `table` for inference and stacks its tensors.
    ///
    /// Flag failures are logged as warnings; the rows are kept.
    ///
    /// # Errors
    ///
    /// - [`ArdError::EmptyResult`] if the table is empty.
    /// - [`ArdError::MultipleWindows`] if a pixel has more than one window.
    pub fn from_table(table: ArdTable) -> Result<Self, ArdError> {
        let table = table.require_non_empty()?;

        let mut per_pixel: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        for s in table.samples() {
            *per_pixel.entry((s.row, s.col)).or_default() += 1;
        }
        if let Some((&(row, col), &count)) = per_pixel.iter().find(|(_, c)| **c > 1) {
            return Err(ArdError::MultipleWindows { row, col, count });
        }

        let quality = table.quality_report();
        if quality.nan_input_evi + quality.nan_input_w + quality.nan_output_w > 0 {
            warn!(
                nan_input_evi = quality.nan_input_evi,
                nan_input_w = quality.nan_input_w,
                nan_output_w = quality.nan_output_w,
                "inference batch contains missing values"
            );
        }
        if quality.input_evi_le1 > 0 {
            warn!(
                rows = quality.input_evi_le1,
                variable = table.variable_name(),
                "inference batch contains vegetation values outside [-1, 1]"
            );
        }

        let tensors = table.tensors()?;
        Ok(Self {
            table,
            tensors,
            quality,
        })
    }

    /// The validated table.
    pub fn table(&self) -> &ArdTable {
        &self.table
    }

    /// Model inputs; `output_evi` holds whatever the calendar supplied.
    pub fn tensors(&self) -> &ArdTensors {
        &self.tensors
    }

    /// Flag failure counts.
    pub fn quality(&self) -> &QualityReport {
        &self.quality
    }

    /// The window index shared by the batch's rows.
    pub fn window(&self) -> Option<i64> {
        self.table.samples().first().map(|s| s.window)
    }

    /// The `output_days` dates following the last scene, labelling the
    /// forecast steps.
    pub fn forecast_dates(&self, last_scene: NaiveDate) -> Vec<NaiveDate> {
        (1..=self.table.output_days() as u64)
            .filter_map(|i| last_scene.checked_add_days(Days::new(i)))
            .collect()
    }
}
