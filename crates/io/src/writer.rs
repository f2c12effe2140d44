//! High-level Parquet writer configuration and orchestration.

use std::path::Path;

use canopy_ard::{ArdTable, Split};
use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::IoError;
use crate::parquet_write;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing ARD tables to Parquet.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression algorithm to use.
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Compression algorithm.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Maximum number of rows per row group.
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// One boundary's table with the labels it is written under.
#[derive(Debug, Clone, Copy)]
pub struct ArdPart<'a> {
    /// Boundary the samples were built from.
    pub boundary_id: &'a str,
    /// Split of the boundary, `None` for inference batches.
    pub split: Option<Split>,
    /// The samples.
    pub table: &'a ArdTable,
}

impl<'a> ArdPart<'a> {
    /// Creates a part.
    pub fn new(boundary_id: &'a str, split: Option<Split>, table: &'a ArdTable) -> Self {
        Self {
            boundary_id,
            split,
            table,
        }
    }
}

/// Checks that every part shares the first part's layout.
fn check_layout(parts: &[ArdPart<'_>]) -> Result<(), IoError> {
    let Some(first) = parts.first() else {
        return Err(IoError::Validation {
            count: 1,
            details: "no tables to write".to_string(),
        });
    };
    let reference = first.table;

    let errors: Vec<String> = parts
        .iter()
        .filter(|p| {
            p.table.variable_name() != reference.variable_name()
                || p.table.input_days() != reference.input_days()
                || p.table.output_days() != reference.output_days()
                || p.table.weather_params() != reference.weather_params()
        })
        .map(|p| {
            format!(
                "boundary {} does not match the layout of boundary {}",
                p.boundary_id, first.boundary_id
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(IoError::Validation {
            count: errors.len(),
            details: errors.join("; "),
        })
    }
}

/// Writes ARD tables to a Parquet file, one row per windowed sample.
///
/// Every part must share the same variable name, window lengths and weather
/// parameters; the layout is stored once as schema metadata. Empty parts
/// contribute no rows.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, `parts`
/// is empty, or the layouts differ, or [`IoError::Parquet`] if schema
/// construction, batch conversion, or file I/O fails.
#[tracing::instrument(skip_all, fields(path = %path.display(), parts = parts.len()))]
pub fn write_ard_parquet(
    path: &Path,
    parts: &[ArdPart<'_>],
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    check_layout(parts)?;

    let schema = parquet_write::build_schema(parts[0].table)?;

    let compression = config.compression.to_parquet()?;
    let props = WriterProperties::builder()
        .set_compression(compression)
        .set_max_row_group_size(config.row_group_size)
        .build();

    let batches: Vec<_> = parts
        .iter()
        .filter(|p| !p.table.is_empty())
        .map(|p| parquet_write::ard_to_record_batch(p, &schema))
        .collect::<Result<Vec<_>, _>>()?;

    parquet_write::write_batches(path, &batches, &schema, props)?;

    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    info!(rows, "wrote ARD parquet");
    Ok(())
}
