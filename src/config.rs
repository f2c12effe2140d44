use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Canopy configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanopyConfig {
    /// Seed of the train/validation draw.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// ARD construction settings.
    pub ard: ArdToml,

    /// Multi-boundary batch settings.
    #[serde(default)]
    pub batch: BatchToml,

    /// Inference preparation settings.
    #[serde(default)]
    pub prepare: PrepareToml,
}

fn default_seed() -> u64 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub scene_refs: Option<PathBuf>,
    pub weather_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub stats_output: Option<PathBuf>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            scene_refs: None,
            weather_dir: None,
            output: None,
            stats_output: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

/// Dates use the `DD-MM-YYYY` form of the collaborator's settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArdToml {
    pub interpolation_start: String,
    pub interpolation_end: String,
    pub reference_date: String,
    pub weather_params: Vec<String>,
    #[serde(default = "default_variable_name")]
    pub variable_name: String,
    #[serde(default = "default_spatial_stride")]
    pub spatial_stride: usize,
    #[serde(default = "default_input_days")]
    pub input_days: u32,
    #[serde(default = "default_output_days")]
    pub output_days: u32,
    #[serde(default = "default_lowess_frac")]
    pub lowess_frac: f64,
    #[serde(default)]
    pub lowess_iterations: usize,
    #[serde(default = "default_gap_limit")]
    pub gap_limit: usize,
    #[serde(default = "default_true")]
    pub extrapolate: bool,
    #[serde(default = "default_std_floor")]
    pub std_floor: f64,
}

fn default_variable_name() -> String {
    "ndvi".to_string()
}
fn default_spatial_stride() -> usize {
    10
}
fn default_input_days() -> u32 {
    30
}
fn default_output_days() -> u32 {
    10
}
fn default_lowess_frac() -> f64 {
    0.2
}
fn default_gap_limit() -> usize {
    100
}
fn default_true() -> bool {
    true
}
fn default_std_floor() -> f64 {
    0.001
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchToml {
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_train_fraction")]
    pub train_fraction: f64,
}

impl Default for BatchToml {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            train_fraction: default_train_fraction(),
        }
    }
}

fn default_workers() -> usize {
    8
}
fn default_train_fraction() -> f64 {
    0.8
}

/// Inference windows end at the boundary's last scene.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrepareToml {
    #[serde(default = "default_prepare_stride")]
    pub spatial_stride: usize,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

impl Default for PrepareToml {
    fn default() -> Self {
        Self {
            spatial_stride: default_prepare_stride(),
            lookback_days: default_lookback_days(),
        }
    }
}

fn default_prepare_stride() -> usize {
    1
}
fn default_lookback_days() -> u32 {
    60
}
