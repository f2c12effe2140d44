//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use chrono::Days;

use canopy_ard::ArdConfig;
use canopy_calendar::{DateRange, NaiveDate, parse_reference_date};
use canopy_io::{Compression, WriterConfig};
use canopy_smooth::{GapFillConfig, LowessConfig};

use crate::config::*;

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Parses a `DD-MM-YYYY` setting, naming the key on failure.
pub fn parse_setting_date(key: &str, value: &str) -> Result<NaiveDate> {
    parse_reference_date(value).with_context(|| format!("invalid [ard].{key}: {value:?}"))
}

/// Applies the window, smoothing and normalization settings shared by
/// training and inference.
fn apply_shared(cfg: ArdConfig, ard: &ArdToml) -> ArdConfig {
    cfg.with_variable_name(&ard.variable_name)
        .with_input_days(ard.input_days)
        .with_output_days(ard.output_days)
        .with_lowess(
            LowessConfig::new()
                .with_frac(ard.lowess_frac)
                .with_iterations(ard.lowess_iterations),
        )
        .with_gap_fill(
            GapFillConfig::new()
                .with_limit(ard.gap_limit)
                .with_extrapolate(ard.extrapolate),
        )
        .with_std_floor(ard.std_floor)
}

/// Builds the training [`ArdConfig`] from the TOML ARD configuration.
pub fn build_ard_config(ard: &ArdToml) -> Result<ArdConfig> {
    let start = parse_setting_date("interpolation_start", &ard.interpolation_start)?;
    let end = parse_setting_date("interpolation_end", &ard.interpolation_end)?;
    let reference = parse_setting_date("reference_date", &ard.reference_date)?;
    let interpolation = DateRange::new(start, end)?;

    let cfg = apply_shared(
        ArdConfig::new(interpolation, reference, ard.weather_params.clone()),
        ard,
    )
    .with_spatial_stride(ard.spatial_stride);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds the inference [`ArdConfig`] for a boundary whose last scene was
/// acquired on `last_scene`.
///
/// The interpolation calendar covers the `lookback_days` before the last
/// scene, and the reference date sits `input_days + 1` days before it so
/// that the single window ends on the forecast horizon.
pub fn build_prepare_config(
    ard: &ArdToml,
    prepare: &PrepareToml,
    last_scene: NaiveDate,
) -> Result<ArdConfig> {
    let start = last_scene
        .checked_sub_days(Days::new(u64::from(prepare.lookback_days)))
        .context("lookback reaches before the supported calendar")?;
    let reference = last_scene
        .checked_sub_days(Days::new(u64::from(ard.input_days) + 1))
        .context("reference date reaches before the supported calendar")?;
    let interpolation = DateRange::new(start, last_scene)?;

    let cfg = apply_shared(
        ArdConfig::new(interpolation, reference, ard.weather_params.clone()),
        ard,
    )
    .with_spatial_stride(prepare.spatial_stride);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoConfig) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    Ok(WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(io.row_group_size))
}
