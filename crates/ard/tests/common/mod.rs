//! GeoTIFF and weather fixtures shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::path::Path;

use canopy_ard::{ArdConfig, SceneRef};
use canopy_calendar::{DateRange, NaiveDate};
use canopy_weather::{WeatherStats, WeatherTable};
use chrono::TimeDelta;
use ndarray::Array2;
use tiff::encoder::{TiffEncoder, colortype};
use tiff::tags::Tag;

pub const ROWS: usize = 2;
pub const COLS: usize = 2;
pub const PARAM: &str = "temperature-F";

pub fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 4, 1).unwrap()
}

pub fn day(k: usize) -> NaiveDate {
    start() + TimeDelta::days(k as i64)
}

/// Vegetation value of pixel `(row, col)` on day `k`. Pixel `(1, 1)` is
/// always zero.
pub fn ndvi(row: usize, col: usize, k: usize) -> f64 {
    if (row, col) == (1, 1) {
        0.0
    } else {
        0.2 + 0.01 * k as f64 + 0.05 * col as f64 + 0.1 * row as f64
    }
}

pub fn write_scene(path: &Path, k: usize) {
    let data: Vec<f64> = (0..ROWS * COLS)
        .map(|i| ndvi(i / COLS, i % COLS, k))
        .collect();
    let file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    let mut image = encoder
        .new_image::<colortype::Gray64Float>(COLS as u32, ROWS as u32)
        .unwrap();
    image
        .encoder()
        .write_tag(Tag::ModelPixelScaleTag, &[10.0_f64, 10.0, 0.0][..])
        .unwrap();
    image
        .encoder()
        .write_tag(
            Tag::ModelTiepointTag,
            &[0.0_f64, 0.0, 0.0, 500_000.0, 4_000_000.0, 0.0][..],
        )
        .unwrap();
    image.write_data(&data).unwrap();
}

/// Writes one daily scene per day in `0..n_days` and returns their
/// references.
pub fn write_scenes(dir: &Path, boundary: &str, n_days: usize) -> Vec<SceneRef> {
    (0..n_days)
        .map(|k| {
            let path = dir.join(format!("{boundary}_{k:03}.tif"));
            write_scene(&path, k);
            SceneRef::new(path, format!("{}T10:30:00Z", day(k)), boundary)
        })
        .collect()
}

/// Daily weather `60 + k` for days `0..n_days`.
pub fn weather(n_days: usize) -> WeatherTable {
    let dates = (0..n_days).map(day).collect();
    let values = Array2::from_shape_fn((n_days, 1), |(k, _)| 60.0 + k as f64);
    WeatherTable::new(dates, vec![PARAM.to_string()], values).unwrap()
}

pub fn stats() -> WeatherStats {
    WeatherStats::new(vec![PARAM.to_string()], vec![70.0], vec![10.0]).unwrap()
}

pub fn config(n_days: usize) -> ArdConfig {
    let calendar = DateRange::new(start(), day(n_days - 1)).unwrap();
    ArdConfig::new(calendar, start(), vec![PARAM.to_string()])
}
