//! Full builds from GeoTIFF files on disk.

mod common;

use approx::assert_relative_eq;
use canopy_ard::{ArdError, ErrorKind, InferenceBatch, SceneRef, build_ard};
use canopy_raster::RasterError;
use canopy_weather::WeatherStats;
use common::*;

#[test]
fn forty_days_give_one_window_per_valid_pixel() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = write_scenes(dir.path(), "farm-1", 40);

    let table = build_ard(&scenes, &weather(40), &stats(), &config(40)).unwrap();

    // Pixel (1, 1) is zero on every date and is masked out.
    let cells: Vec<(usize, usize)> = table.samples().iter().map(|s| (s.row, s.col)).collect();
    assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0)]);

    for s in table.samples() {
        assert_eq!(s.window, 0);
        assert_eq!(s.input_evi.len(), 30);
        assert_eq!(s.output_evi.len(), 10);
        assert_eq!(s.input_weather.dim(), (30, 1));
        assert_eq!(s.forecast_weather.dim(), (10, 1));
        for k in 0..30 {
            assert_relative_eq!(s.input_evi[k], ndvi(s.row, s.col, k), epsilon = 1e-9);
            assert_relative_eq!(s.input_weather[[k, 0]], (k as f64 - 10.0) / 10.0, epsilon = 1e-12);
        }
        for k in 0..10 {
            assert_relative_eq!(s.output_evi[k], ndvi(s.row, s.col, 30 + k), epsilon = 1e-9);
            assert_relative_eq!(
                s.forecast_weather[[k, 0]],
                (20.0 + k as f64) / 10.0,
                epsilon = 1e-12
            );
        }
        assert!(s.is_clean());
    }

    let first = &table.samples()[0];
    assert_relative_eq!(first.lat, 4_000_000.0 - 5.0);
    assert_relative_eq!(first.long, 500_000.0 + 5.0);
}

#[test]
fn twenty_five_days_give_no_rows() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = write_scenes(dir.path(), "farm-1", 25);

    let table = build_ard(&scenes, &weather(25), &stats(), &config(25)).unwrap();
    assert!(table.is_empty());

    let err = table.require_non_empty().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyResult);
}

#[test]
fn builds_are_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let mut scenes = write_scenes(dir.path(), "farm-1", 50);
    let a = build_ard(&scenes, &weather(50), &stats(), &config(50)).unwrap();
    scenes.reverse();
    let b = build_ard(&scenes, &weather(50), &stats(), &config(50)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn every_row_has_complete_non_negative_windows() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = write_scenes(dir.path(), "farm-1", 60);
    let config = config(60).with_input_days(7).with_output_days(3);
    let table = build_ard(&scenes, &weather(60), &stats(), &config).unwrap();

    assert_eq!(table.len(), 3 * 6);
    let mut keys: Vec<(usize, usize, i64)> = table
        .samples()
        .iter()
        .map(|s| (s.row, s.col, s.window))
        .collect();
    for s in table.samples() {
        assert!(s.window >= 0);
        assert_eq!(s.input_evi.len(), 7);
        assert_eq!(s.output_evi.len(), 3);
    }
    let n = keys.len();
    keys.dedup();
    assert_eq!(keys.len(), n);
}

#[test]
fn stride_keeps_every_other_cell() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = write_scenes(dir.path(), "farm-1", 40);
    let config = config(40).with_spatial_stride(2);
    let table = build_ard(&scenes, &weather(40), &stats(), &config).unwrap();
    let cells: Vec<(usize, usize)> = table.samples().iter().map(|s| (s.row, s.col)).collect();
    assert_eq!(cells, vec![(0, 0)]);
}

#[test]
fn zero_std_is_floored() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = write_scenes(dir.path(), "farm-1", 40);
    let flat = WeatherStats::new(vec![PARAM.to_string()], vec![60.0], vec![0.0]).unwrap();
    let table = build_ard(&scenes, &weather(40), &flat, &config(40)).unwrap();
    let s = &table.samples()[0];
    assert_relative_eq!(s.input_weather[[0, 0]], 0.0);
    assert_relative_eq!(s.input_weather[[1, 0]], 1000.0, epsilon = 1e-9);
}

#[test]
fn weather_shorter_than_calendar_limits_windows() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = write_scenes(dir.path(), "farm-1", 40);
    let table = build_ard(&scenes, &weather(35), &stats(), &config(40)).unwrap();
    assert!(table.is_empty());
}

#[test]
fn empty_weather_gives_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = write_scenes(dir.path(), "farm-1", 40);
    let table = build_ard(&scenes, &weather(0), &stats(), &config(40)).unwrap();
    assert!(table.is_empty());
}

#[test]
fn inference_batch_from_built_table() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = write_scenes(dir.path(), "farm-1", 40);
    let table = build_ard(&scenes, &weather(40), &stats(), &config(40)).unwrap();
    let batch = InferenceBatch::from_table(table).unwrap();
    assert_eq!(batch.tensors().input_evi.dim(), (3, 30, 1));
    assert_eq!(batch.forecast_dates(day(39)).first().copied(), Some(day(40)));
}

#[test]
fn duplicate_scene_date_is_a_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut scenes = write_scenes(dir.path(), "farm-1", 40);
    let again = SceneRef::new(
        scenes[1].file_path.clone(),
        format!("{}T23:00:00Z", day(0)),
        "farm-1",
    );
    scenes.push(again);
    let err = build_ard(&scenes, &weather(40), &stats(), &config(40)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
    assert!(matches!(
        err,
        ArdError::Raster(RasterError::DuplicateDate { .. })
    ));
}

#[test]
fn missing_raster_is_a_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut scenes = write_scenes(dir.path(), "farm-1", 40);
    scenes[3].file_path = dir.path().join("gone.tif");
    let err = build_ard(&scenes, &weather(40), &stats(), &config(40)).unwrap_err();
    assert!(matches!(err, ArdError::Raster(RasterError::Open { .. })));
}

#[test]
fn statistics_must_match_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let scenes = write_scenes(dir.path(), "farm-1", 40);
    let other = WeatherStats::new(vec!["rain-in".to_string()], vec![0.0], vec![1.0]).unwrap();
    let err = build_ard(&scenes, &weather(40), &other, &config(40)).unwrap_err();
    assert!(matches!(err, ArdError::InvalidConfig { .. }));
}
