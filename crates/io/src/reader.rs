//! CSV and JSON readers for scene references and weather tables.

use std::path::Path;

use canopy_ard::SceneRef;
use canopy_calendar::parse_date;
use canopy_weather::{WeatherTable, flatten_records};
use csv::ReaderBuilder;
use ndarray::Array2;
use tracing::debug;

use crate::error::IoError;

/// Name of the date column in weather CSV files.
pub const DATE_COLUMN: &str = "dateTime";

/// Reads the scene reference table.
///
/// Only `filePath`, `sceneDateTime` and `boundaryId` are used; any other
/// column (band name, resolution, cloud cover, ...) is ignored.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, or
/// [`IoError::Csv`] if a row cannot be parsed.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_scene_refs(path: &Path) -> Result<Vec<SceneRef>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let scenes = reader
        .deserialize::<SceneRef>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| csv_error(path, e))?;

    debug!(rows = scenes.len(), "read scene references");
    Ok(scenes)
}

/// Reads a wide weather CSV: a `dateTime` column plus one column per
/// parameter.
///
/// Empty or non-numeric cells read as NaN, so non-numeric columns carried by
/// the provider (ids, units) are kept as all-NaN parameters and dropped later
/// by selection.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::MissingColumn`] if there is no `dateTime` column.
/// - [`IoError::Csv`] if the file is malformed.
/// - [`IoError::Calendar`] if a date cannot be parsed.
/// - [`IoError::Weather`] if two rows share a date.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_weather_csv(path: &Path) -> Result<WeatherTable, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    let date_idx = headers
        .iter()
        .position(|h| h == DATE_COLUMN)
        .ok_or_else(|| IoError::MissingColumn {
            name: DATE_COLUMN.to_string(),
            path: path.to_path_buf(),
        })?;
    let value_idx: Vec<usize> = (0..headers.len()).filter(|&i| i != date_idx).collect();
    let params: Vec<String> = value_idx.iter().map(|&i| headers[i].to_string()).collect();

    let mut dates = Vec::new();
    let mut flat = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        dates.push(parse_date(&record[date_idx])?);
        flat.extend(value_idx.iter().map(|&i| parse_cell(&record[i])));
    }

    let values =
        Array2::from_shape_vec((dates.len(), params.len()), flat).map_err(|e| IoError::Csv {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!(rows = dates.len(), params = params.len(), "read weather table");
    Ok(WeatherTable::new(dates, params, values)?)
}

/// Reads the weather provider's JSON record array.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::Json`] if the file is not valid JSON.
/// - [`IoError::Weather`] if the records are malformed.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_weather_json(path: &Path) -> Result<WeatherTable, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| json_error(path, e))?;
    let records: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| json_error(path, e))?;
    Ok(flatten_records(&records)?)
}

/// Reads a weather table, choosing the format from the file extension
/// (`.json` for provider records, CSV otherwise).
///
/// # Errors
///
/// Same as [`read_weather_csv`] or [`read_weather_json`].
pub fn read_weather(path: &Path) -> Result<WeatherTable, IoError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => read_weather_json(path),
        _ => read_weather_csv(path),
    }
}

fn parse_cell(cell: &str) -> f64 {
    cell.parse::<f64>().unwrap_or(f64::NAN)
}

fn csv_error(path: &Path, e: impl std::fmt::Display) -> IoError {
    IoError::Csv {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

pub(crate) fn json_error(path: &Path, e: impl std::fmt::Display) -> IoError {
    IoError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
