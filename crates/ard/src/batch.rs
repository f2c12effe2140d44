//! Multi-boundary batch driver and training-set assembly.

use canopy_weather::{WeatherStats, WeatherTable};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::builder::build_ard;
use crate::config::ArdConfig;
use crate::error::ArdError;
use crate::scene::SceneRef;
use crate::split::Split;
use crate::table::ArdTable;
use crate::tensor::ArdTensors;

/// Inputs of one boundary.
#[derive(Debug, Clone)]
pub struct BoundaryJob {
    /// Boundary identifier.
    pub boundary_id: String,
    /// Split the boundary belongs to.
    pub split: Split,
    /// Scene references of the boundary.
    pub scenes: Vec<SceneRef>,
    /// Raw (unnormalized) weather of the boundary.
    pub weather: WeatherTable,
}

/// A successfully built boundary.
#[derive(Debug, Clone)]
pub struct BoundaryArd {
    /// Boundary identifier.
    pub boundary_id: String,
    /// Split the boundary belongs to.
    pub split: Split,
    /// The boundary's samples.
    pub table: ArdTable,
}

/// A boundary whose build failed.
#[derive(Debug)]
pub struct BoundaryFailure {
    /// Boundary identifier.
    pub boundary_id: String,
    /// Why it failed.
    pub error: ArdError,
}

/// Outcome of [`build_batch`], in job order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Boundaries that produced a table (possibly empty).
    pub successes: Vec<BoundaryArd>,
    /// Boundaries that failed.
    pub failures: Vec<BoundaryFailure>,
}

/// Builds every job on a pool of `workers` threads. A failing boundary is
/// recorded in [`BatchReport::failures`] and does not stop the others.
///
/// # Errors
///
/// - [`ArdError::InvalidConfig`] if `workers` is zero or the configuration
///   is invalid.
/// - [`ArdError::WorkerPool`] if the thread pool cannot be created.
#[tracing::instrument(skip_all, fields(n_jobs = jobs.len(), workers = workers))]
pub fn build_batch(
    jobs: Vec<BoundaryJob>,
    stats: &WeatherStats,
    config: &ArdConfig,
    workers: usize,
) -> Result<BatchReport, ArdError> {
    if workers == 0 {
        return Err(ArdError::InvalidConfig {
            reason: "workers must be >= 1".to_string(),
        });
    }
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| ArdError::WorkerPool {
            reason: e.to_string(),
        })?;

    let results: Vec<(String, Split, Result<ArdTable, ArdError>)> = pool.install(|| {
        jobs.into_par_iter()
            .map(|job| {
                let result = build_ard(&job.scenes, &job.weather, stats, config);
                (job.boundary_id, job.split, result)
            })
            .collect()
    });

    let mut report = BatchReport::default();
    for (boundary_id, split, result) in results {
        match result {
            Ok(table) => report.successes.push(BoundaryArd {
                boundary_id,
                split,
                table,
            }),
            Err(error) => {
                warn!(boundary = %boundary_id, error = %error, "boundary failed");
                report.failures.push(BoundaryFailure { boundary_id, error });
            }
        }
    }
    info!(
        succeeded = report.successes.len(),
        failed = report.failures.len(),
        "batch finished"
    );
    Ok(report)
}

/// Clean samples of a batch stacked into train and validation tensors.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    /// Tensors of the training boundaries.
    pub train: ArdTensors,
    /// Tensors of the validation boundaries.
    pub validation: ArdTensors,
}

impl TrainingSet {
    /// Keeps samples passing all quality flags and stacks them by split.
    ///
    /// # Errors
    ///
    /// - [`ArdError::EmptyResult`] if no clean sample remains.
    /// - [`ArdError::InvalidConfig`] if the tables disagree on window lengths
    ///   or weather parameters.
    pub fn from_report(report: &BatchReport) -> Result<Self, ArdError> {
        let first = report
            .successes
            .iter()
            .find(|b| !b.table.is_empty())
            .ok_or(ArdError::EmptyResult)?;
        let (input_days, output_days) = (first.table.input_days(), first.table.output_days());
        let params = first.table.weather_params();

        for b in &report.successes {
            let t = &b.table;
            if t.input_days() != input_days
                || t.output_days() != output_days
                || t.weather_params() != params
            {
                return Err(ArdError::InvalidConfig {
                    reason: format!("boundary '{}' was built with a different layout", b.boundary_id),
                });
            }
        }

        let clean = |split: Split| {
            report
                .successes
                .iter()
                .filter(move |b| b.split == split)
                .flat_map(|b| b.table.samples().iter().filter(|s| s.is_clean()))
        };
        let n_clean = clean(Split::Train).count() + clean(Split::Validation).count();
        if n_clean == 0 {
            return Err(ArdError::EmptyResult);
        }

        let train =
            ArdTensors::from_samples(clean(Split::Train), input_days, output_days, params.len())?;
        let validation =
            ArdTensors::from_samples(clean(Split::Validation), input_days, output_days, params.len())?;
        info!(train = train.len(), validation = validation.len(), "assembled training set");
        Ok(Self { train, validation })
    }
}
