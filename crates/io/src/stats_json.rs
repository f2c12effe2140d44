//! JSON persistence of weather normalization statistics.

use std::path::Path;

use canopy_weather::WeatherStats;
use tracing::info;

use crate::error::IoError;
use crate::reader::json_error;

/// Writes statistics as `{"params": [...], "mean": [...], "std": [...]}`.
///
/// # Errors
///
/// Returns [`IoError::Json`] if serialization or the file write fails.
pub fn write_stats_json(path: &Path, stats: &WeatherStats) -> Result<(), IoError> {
    let text = serde_json::to_string_pretty(stats).map_err(|e| json_error(path, e))?;
    std::fs::write(path, text).map_err(|e| json_error(path, e))?;
    info!(path = %path.display(), params = stats.params().len(), "wrote weather statistics");
    Ok(())
}

/// Reads statistics written by [`write_stats_json`] and validates them.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::Json`] if the file is not a statistics document.
/// - [`IoError::Weather`] if the vectors are misaligned.
pub fn read_stats_json(path: &Path) -> Result<WeatherStats, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| json_error(path, e))?;
    let stats: WeatherStats = serde_json::from_str(&text).map_err(|e| json_error(path, e))?;
    stats.validate()?;
    Ok(stats)
}
