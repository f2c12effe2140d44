//! The ARD builder.

use canopy_raster::{SceneStack, read_band};
use canopy_weather::{WeatherStats, WeatherTable};
use tracing::{debug, info};

use crate::config::ArdConfig;
use crate::error::ArdError;
use crate::scene::SceneRef;
use crate::table::ArdTable;
use crate::vegetation::daily_vegetation;
use crate::window::{PackedDay, window_pixel};

/// Builds the windowed samples of one boundary.
///
/// Rasters are decoded and stacked by acquisition date, always-zero pixels
/// are masked, the grid is subsampled, and each pixel's observations are
/// smoothed and interpolated onto the daily calendar. The curve is joined
/// with the normalized weather on date and grouped into complete
/// (input, output) windows counted from the reference date.
///
/// An empty weather table or a calendar without any complete window yields
/// an empty table; use [`ArdTable::require_non_empty`] where that is an
/// error.
///
/// # Errors
///
/// - [`ArdError::InvalidConfig`] for an invalid configuration, or when the
///   statistics do not cover the configured weather parameters in order.
/// - [`ArdError::EmptyScenes`] / [`ArdError::MixedBoundaries`] for a bad
///   scene list.
/// - [`ArdError::Raster`] for unreadable, duplicate-date, or
///   non-co-registered rasters.
/// - [`ArdError::Weather`] for a weather table lacking a parameter.
/// - [`ArdError::DuplicateEntry`] if two records land in one window slot.
#[tracing::instrument(skip_all, fields(boundary = scenes.first().map(|s| s.boundary_id.as_str()).unwrap_or(""), n_scenes = scenes.len()))]
pub fn build_ard(
    scenes: &[SceneRef],
    weather: &WeatherTable,
    stats: &WeatherStats,
    config: &ArdConfig,
) -> Result<ArdTable, ArdError> {
    config.validate()?;
    stats.validate()?;
    if stats.params() != config.weather_params() {
        return Err(ArdError::InvalidConfig {
            reason: format!(
                "statistics cover {:?}, configuration requests {:?}",
                stats.params(),
                config.weather_params()
            ),
        });
    }
    check_boundary(scenes)?;
    let spec = config.window_spec()?;
    let n_params = config.weather_params().len();
    let empty = || {
        ArdTable::new(
            config.variable_name(),
            config.input_days() as usize,
            config.output_days() as usize,
            config.weather_params().to_vec(),
            Vec::new(),
        )
    };

    let mut stack = read_stack(scenes)?;
    stack.mask_always_zero();
    let stack = stack.subsample(config.spatial_stride())?;

    let Some(span) = weather.date_span() else {
        info!("weather table is empty");
        return Ok(empty());
    };
    let normalized = stats.normalize(weather, config.std_floor())?;

    let series = stack.pixel_series();
    debug!(n_pixels = series.len(), span_days = span.len(), "interpolating pixels");

    let mut samples = Vec::new();
    for pixel_series in &series {
        let vegetation = daily_vegetation(
            pixel_series,
            config.interpolation(),
            span,
            config.lowess(),
            config.gap_fill(),
        )?;

        let days: Vec<PackedDay> = span
            .iter()
            .zip(vegetation)
            .filter_map(|(date, veg)| {
                let row = normalized.row_of(date)?;
                let mut values = Vec::with_capacity(1 + n_params);
                values.push(veg);
                values.extend(normalized.values().row(row).iter().copied());
                Some(PackedDay { date, values })
            })
            .collect();

        samples.extend(window_pixel(&pixel_series.pixel, days, &spec, n_params)?);
    }

    let table = ArdTable::new(
        config.variable_name(),
        config.input_days() as usize,
        config.output_days() as usize,
        config.weather_params().to_vec(),
        samples,
    );
    info!(
        n_pixels = series.len(),
        n_samples = table.len(),
        n_windows = table.windows().len(),
        "built ARD"
    );
    Ok(table)
}

fn check_boundary(scenes: &[SceneRef]) -> Result<(), ArdError> {
    let first = scenes.first().ok_or(ArdError::EmptyScenes)?;
    if let Some(other) = scenes.iter().find(|s| s.boundary_id != first.boundary_id) {
        return Err(ArdError::MixedBoundaries {
            expected: first.boundary_id.clone(),
            found: other.boundary_id.clone(),
        });
    }
    Ok(())
}

fn read_stack(scenes: &[SceneRef]) -> Result<SceneStack, ArdError> {
    let bands = scenes
        .iter()
        .map(|scene| -> Result<_, ArdError> {
            Ok((scene.scene_date()?, read_band(&scene.file_path)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SceneStack::from_bands(bands)?)
}
