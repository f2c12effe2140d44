//! Prepare command: build the inference batch of one boundary.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span, warn};

use canopy_ard::{InferenceBatch, SceneRef, build_ard};
use canopy_calendar::NaiveDate;
use canopy_io::{ArdPart, read_scene_refs, read_stats_json, read_weather, write_ard_parquet};
use canopy_weather::WeatherTable;

use crate::build_cmd::historical_path;
use crate::cli::PrepareArgs;
use crate::convert;
use crate::load_config;

/// Acquisition date of the most recent scene.
pub(crate) fn last_scene_date(scenes: &[SceneRef]) -> Result<NaiveDate> {
    let dates = scenes
        .iter()
        .map(SceneRef::scene_date)
        .collect::<Result<Vec<_>, _>>()?;
    dates
        .into_iter()
        .max()
        .ok_or_else(|| anyhow!("no scenes to date"))
}

/// Historical weather followed by the forecast when one is on disk, both
/// restricted to `params`.
pub(crate) fn load_weather(
    weather_dir: &Path,
    boundary_id: &str,
    params: &[String],
) -> Result<WeatherTable> {
    let hist_path = historical_path(weather_dir, boundary_id);
    let historical = read_weather(&hist_path)
        .with_context(|| format!("failed to read weather: {}", hist_path.display()))?
        .select(params)?;

    let forecast_path = weather_dir.join(format!("{boundary_id}_forecast.csv"));
    if !forecast_path.exists() {
        warn!(path = %forecast_path.display(), "no weather forecast, using history only");
        return Ok(historical);
    }
    let forecast = read_weather(&forecast_path)
        .with_context(|| format!("failed to read weather: {}", forecast_path.display()))?
        .select(params)?;
    Ok(historical.concat(&forecast)?)
}

/// Run the inference preparation of one boundary.
pub fn run(args: PrepareArgs) -> Result<()> {
    let _cmd = info_span!("prepare", boundary = %args.boundary).entered();
    let config = load_config(&args.config)?;

    // 1. Resolve paths
    let scene_path = config
        .io
        .scene_refs
        .as_ref()
        .ok_or_else(|| anyhow!("no scene table: set [io].scene_refs in config"))?;
    let weather_dir = config
        .io
        .weather_dir
        .as_ref()
        .ok_or_else(|| anyhow!("no weather folder: set [io].weather_dir in config"))?;
    let output = args
        .output
        .clone()
        .or_else(|| config.io.output.clone())
        .ok_or_else(|| anyhow!("no output path: set [io].output in config or use --output"))?;

    // 2. Inputs of the boundary
    let stats = read_stats_json(&args.stats)
        .with_context(|| format!("failed to read statistics: {}", args.stats.display()))?;
    let scenes: Vec<SceneRef> = read_scene_refs(scene_path)
        .with_context(|| format!("failed to read scene table: {}", scene_path.display()))?
        .into_iter()
        .filter(|s| s.boundary_id == args.boundary)
        .collect();
    if scenes.is_empty() {
        bail!("no scenes for boundary {:?}", args.boundary);
    }
    let last_scene = last_scene_date(&scenes)?;
    let weather = load_weather(weather_dir, &args.boundary, stats.params())?;
    info!(
        scenes = scenes.len(),
        weather_days = weather.len(),
        last_scene = %last_scene,
        "inputs loaded"
    );

    // 3. Build and validate
    let ard_cfg = convert::build_prepare_config(&config.ard, &config.prepare, last_scene)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;
    let table = build_ard(&scenes, &weather, &stats, &ard_cfg)?;
    let batch = InferenceBatch::from_table(table)?;

    let forecast = batch.forecast_dates(last_scene);
    info!(
        rows = batch.table().len(),
        window = batch.window().unwrap_or_default(),
        first_forecast = %forecast.first().map(ToString::to_string).unwrap_or_default(),
        last_forecast = %forecast.last().map(ToString::to_string).unwrap_or_default(),
        "inference batch ready"
    );

    // 4. Write
    let parts = [ArdPart::new(&args.boundary, None, batch.table())];
    write_ard_parquet(&output, &parts, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;

    info!(path = %output.display(), "prepare complete");
    Ok(())
}
