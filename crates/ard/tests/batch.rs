//! Batch driver and training-set assembly.

mod common;

use canopy_ard::{ArdError, BoundaryJob, Split, TrainingSet, assign_splits, build_batch};
use common::*;

fn job(dir: &std::path::Path, id: &str, split: Split, n_days: usize) -> BoundaryJob {
    BoundaryJob {
        boundary_id: id.to_string(),
        split,
        scenes: write_scenes(dir, id, n_days),
        weather: weather(n_days),
    }
}

#[test]
fn failing_boundary_does_not_stop_others() {
    let dir = tempfile::tempdir().unwrap();
    let good = job(dir.path(), "farm-a", Split::Train, 40);
    let mut bad = job(dir.path(), "farm-b", Split::Validation, 40);
    bad.scenes[0].file_path = dir.path().join("missing.tif");
    let val = job(dir.path(), "farm-c", Split::Validation, 40);

    let report = build_batch(vec![good, bad, val], &stats(), &config(40), 2).unwrap();

    assert_eq!(report.successes.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].boundary_id, "farm-b");
    assert_eq!(report.successes[0].boundary_id, "farm-a");
    assert_eq!(report.successes[1].boundary_id, "farm-c");

    let set = TrainingSet::from_report(&report).unwrap();
    assert_eq!(set.train.input_evi.dim(), (3, 30, 1));
    assert_eq!(set.validation.output_evi.dim(), (3, 10, 1));
    assert_eq!(set.train.input_weather.dim(), (3, 30, 1));
}

#[test]
fn batch_without_samples_is_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let short = job(dir.path(), "farm-a", Split::Train, 20);
    let report = build_batch(vec![short], &stats(), &config(20), 1).unwrap();
    assert_eq!(report.successes.len(), 1);
    assert!(matches!(
        TrainingSet::from_report(&report),
        Err(ArdError::EmptyResult)
    ));
}

#[test]
fn zero_workers_is_invalid() {
    let err = build_batch(vec![], &stats(), &config(40), 0).unwrap_err();
    assert!(matches!(err, ArdError::InvalidConfig { .. }));
}

#[test]
fn splits_drive_job_assignment() {
    let ids: Vec<String> = (0..10).map(|i| format!("farm-{i}")).collect();
    let splits = assign_splits(&ids, 0.8, 3).unwrap();
    assert_eq!(splits.len(), 10);
    assert_eq!(splits, assign_splits(&ids, 0.8, 3).unwrap());
    for ((id, _), expected) in splits.iter().zip(&ids) {
        assert_eq!(id, expected);
    }
}
