//! Build command: assemble the training dataset of every usable boundary.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span, warn};

use canopy_ard::{BoundaryJob, SceneRef, Split, TrainingSet, assign_splits, build_batch};
use canopy_io::{
    ArdPart, read_scene_refs, read_weather_csv, write_ard_parquet, write_stats_json,
};
use canopy_weather::{WeatherStats, WeatherTable};

use crate::cli::BuildArgs;
use crate::convert;
use crate::load_config;

/// A boundary whose rasters and historical weather are all on disk.
#[derive(Debug)]
pub(crate) struct Candidate {
    pub boundary_id: String,
    pub scenes: Vec<SceneRef>,
    pub weather_path: PathBuf,
}

/// Path of a boundary's historical weather table.
pub(crate) fn historical_path(weather_dir: &Path, boundary_id: &str) -> PathBuf {
    weather_dir.join(format!("{boundary_id}_historical.csv"))
}

/// Groups scenes by boundary, in boundary-id order.
pub(crate) fn group_by_boundary(scenes: Vec<SceneRef>) -> BTreeMap<String, Vec<SceneRef>> {
    let mut groups: BTreeMap<String, Vec<SceneRef>> = BTreeMap::new();
    for scene in scenes {
        groups
            .entry(scene.boundary_id.clone())
            .or_default()
            .push(scene);
    }
    groups
}

/// Keeps boundaries whose raster files and historical weather CSV all exist.
pub(crate) fn select_candidates(
    groups: BTreeMap<String, Vec<SceneRef>>,
    weather_dir: &Path,
) -> Vec<Candidate> {
    groups
        .into_iter()
        .filter_map(|(boundary_id, scenes)| {
            if let Some(missing) = scenes.iter().find(|s| !s.file_path.exists()) {
                warn!(
                    boundary = %boundary_id,
                    path = %missing.file_path.display(),
                    "raster file missing, skipping boundary"
                );
                return None;
            }
            let weather_path = historical_path(weather_dir, &boundary_id);
            if !weather_path.exists() {
                warn!(
                    boundary = %boundary_id,
                    path = %weather_path.display(),
                    "historical weather missing, skipping boundary"
                );
                return None;
            }
            Some(Candidate {
                boundary_id,
                scenes,
                weather_path,
            })
        })
        .collect()
}

/// Reads each candidate's historical weather restricted to `params`.
///
/// Boundaries whose weather is unreadable or lacks one of `params` are
/// skipped with a warning.
pub(crate) fn load_candidates(
    candidates: Vec<Candidate>,
    params: &[String],
) -> Vec<(Candidate, WeatherTable)> {
    let mut loaded = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let weather = match read_weather_csv(&candidate.weather_path) {
            Ok(weather) => weather,
            Err(e) => {
                warn!(
                    boundary = %candidate.boundary_id,
                    error = %e,
                    "unreadable weather, skipping boundary"
                );
                continue;
            }
        };
        match weather.select(params) {
            Ok(weather) => loaded.push((candidate, weather)),
            Err(e) => warn!(
                boundary = %candidate.boundary_id,
                error = %e,
                "weather lacks a configured parameter, skipping boundary"
            ),
        }
    }
    loaded
}

/// Run the training-set assembly.
pub fn run(args: BuildArgs) -> Result<()> {
    let _cmd = info_span!("build").entered();
    let config = load_config(&args.config)?;
    let seed = args.seed.unwrap_or(config.seed);

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
    let stats_output = config
        .io
        .stats_output
        .clone()
        .unwrap_or_else(|| output.with_extension("stats.json"));

    // 2. Build configs from TOML
    let ard_cfg = convert::build_ard_config(&config.ard)?;
    let writer_cfg = convert::build_writer_config(&config.io)?;

    // 3. Select boundaries with complete inputs
    let scenes = read_scene_refs(scene_path)
        .with_context(|| format!("failed to read scene table: {}", scene_path.display()))?;
    let groups = group_by_boundary(scenes);
    let n_boundaries = groups.len();
    let candidates = select_candidates(groups, weather_dir);

    let loaded = load_candidates(candidates, ard_cfg.weather_params());
    info!(
        boundaries = n_boundaries,
        usable = loaded.len(),
        "selected boundaries"
    );
    if loaded.is_empty() {
        bail!("no boundary has complete raster and weather inputs");
    }

    // 4. Assign splits
    let ids: Vec<String> = loaded.iter().map(|(c, _)| c.boundary_id.clone()).collect();
    let splits = assign_splits(&ids, config.batch.train_fraction, seed)?;
    let jobs: Vec<BoundaryJob> = loaded
        .into_iter()
        .zip(splits)
        .map(|((candidate, weather), (_, split))| BoundaryJob {
            boundary_id: candidate.boundary_id,
            split,
            scenes: candidate.scenes,
            weather,
        })
        .collect();

    // 5. Normalization statistics over the training boundaries
    let train_tables: Vec<&WeatherTable> = jobs
        .iter()
        .filter(|j| j.split == Split::Train)
        .map(|j| &j.weather)
        .collect();
    if train_tables.is_empty() {
        bail!("no boundary was assigned to the training split (seed {seed})");
    }
    let stats = WeatherStats::from_tables(&train_tables, ard_cfg.weather_params())
        .context("failed to compute weather statistics")?;
    write_stats_json(&stats_output, &stats)
        .with_context(|| format!("failed to write statistics: {}", stats_output.display()))?;

    // 6. Build every boundary
    let report = build_batch(jobs, &stats, &ard_cfg, config.batch.workers)?;
    let training = TrainingSet::from_report(&report).context("no clean samples were produced")?;
    info!(
        train = training.train.len(),
        validation = training.validation.len(),
        failed = report.failures.len(),
        "training set assembled"
    );

    // 7. Write clean rows
    let clean: Vec<_> = report.successes.iter().map(|b| b.table.clean()).collect();
    let parts: Vec<ArdPart<'_>> = report
        .successes
        .iter()
        .zip(&clean)
        .map(|(b, table)| ArdPart::new(&b.boundary_id, Some(b.split), table))
        .collect();
    write_ard_parquet(&output, &parts, &writer_cfg)
        .with_context(|| format!("failed to write Parquet: {}", output.display()))?;

    info!(path = %output.display(), "build complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(dir: &Path, file: &str, boundary: &str) -> SceneRef {
        SceneRef::new(dir.join(file), "2021-04-01T00:00:00Z", boundary)
    }

    #[test]
    fn groups_are_keyed_by_boundary() {
        let dir = Path::new("/data");
        let groups = group_by_boundary(vec![
            scene(dir, "a1.tif", "b2"),
            scene(dir, "b1.tif", "b1"),
            scene(dir, "a2.tif", "b2"),
        ]);
        assert_eq!(groups.keys().collect::<Vec<_>>(), ["b1", "b2"]);
        assert_eq!(groups["b2"].len(), 2);
    }

    #[test]
    fn candidates_need_rasters_and_weather() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for file in ["ok.tif", "no_weather.tif"] {
            std::fs::write(root.join(file), b"").unwrap();
        }
        std::fs::write(historical_path(root, "ok"), "dateTime\n").unwrap();
        std::fs::write(historical_path(root, "no_raster"), "dateTime\n").unwrap();

        let groups = group_by_boundary(vec![
            scene(root, "ok.tif", "ok"),
            scene(root, "no_weather.tif", "no_weather"),
            scene(root, "missing.tif", "no_raster"),
        ]);
        let candidates = select_candidates(groups, root);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].boundary_id, "ok");
        assert_eq!(candidates[0].weather_path, root.join("ok_historical.csv"));
    }

    #[test]
    fn weather_without_a_parameter_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(
            historical_path(root, "good"),
            "dateTime,temperature-F,humidity-%\n2021-04-01,60,40\n2021-04-02,70,45\n",
        )
        .unwrap();
        std::fs::write(
            historical_path(root, "no_temp"),
            "dateTime,humidity-%\n2021-04-01,40\n",
        )
        .unwrap();
        std::fs::write(historical_path(root, "broken"), "no date column\n1\n").unwrap();

        let candidates = ["broken", "good", "no_temp"]
            .into_iter()
            .map(|id| Candidate {
                boundary_id: id.to_string(),
                scenes: Vec::new(),
                weather_path: historical_path(root, id),
            })
            .collect();
        let params = vec!["temperature-F".to_string()];
        let loaded = load_candidates(candidates, &params);

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0.boundary_id, "good");
        assert_eq!(loaded[0].1.params(), ["temperature-F"]);

        let tables: Vec<&WeatherTable> = loaded.iter().map(|(_, w)| w).collect();
        let stats = WeatherStats::from_tables(&tables, &params).unwrap();
        assert_eq!(stats.mean()[0], 65.0);
    }
}
