//! Extract command: per-file peaks merged into envelope outputs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use crest_envelope::{CriticalDurations, EnvelopeMode, merge, write_csv_file};
use crest_extract::{BatchExtraction, FsLoader, TracingObserver, extract_all};
use crest_io::{InputFile, discover, read_file_list};

use crate::cli::ExtractArgs;
use crate::config::CrestConfig;
use crate::convert;
use crate::run_log::RunLog;

/// Run the extraction pipeline.
pub fn run(args: ExtractArgs) -> Result<()> {
    let _cmd = info_span!("extract").entered();

    // 1. Config, with command-line overrides
    let mut config = CrestConfig::load(args.config.as_deref())?;
    if args.include_timings {
        config.output.timings = true;
    }
    if let Some(p) = &args.projection {
        config.output.projection = Some(p.clone());
    }
    if let Some(d) = &args.description {
        config.output.description = d.clone();
    }
    let extract_cfg = convert::build_extract_config(&config.extract)?;
    let decimals = convert::output_decimals(&config.output, args.no_round_outputs)?;
    let projection = config
        .output
        .projection
        .as_deref()
        .map(convert::normalize_projection);
    if projection.is_some() && !cfg!(feature = "proj") {
        bail!("GeoJSON output needs a build with the `proj` feature enabled");
    }

    // 2. Inputs
    let inputs = resolve_inputs(&args, &config)?;
    info!(n_files = inputs.len(), "inputs resolved");

    // 3. Output location
    let (out_dir, out_name) = match &args.output_name {
        Some(arg) => convert::split_output_name(arg, &config.output.directory)?,
        None => (
            config.output.directory.clone(),
            config.output.name.clone(),
        ),
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;
    let out_path = |suffix: &str| -> PathBuf { out_dir.join(format!("{out_name}{suffix}")) };

    // 4. Run log, rewritten with the outputs at the end
    let log_path = out_path(".log");
    let mut run_log = RunLog::new(
        config.output.description.clone(),
        config.output.license.clone(),
        &inputs,
    );
    run_log.write(&log_path)?;

    // 5. Extract every file
    let mut observer = TracingObserver::default();
    let batch = extract_all(&inputs, &mut FsLoader, &extract_cfg, &mut observer)
        .context("extraction failed")?;
    for failed in &batch.failed {
        warn!(file = %failed.file, reason = %failed.reason, "file not loaded");
    }
    info!(
        n_loaded = batch.loaded.len(),
        n_failed = batch.failed.len(),
        n_records = batch.records.len(),
        n_omissions = batch.omissions.len(),
        "extraction complete"
    );
    run_log.model_projection = batch.projection.clone();

    // 6. Envelope outputs
    let files: Vec<String> = inputs.iter().map(InputFile::file_name).collect();
    let durations = CriticalDurations::from_inputs(&inputs);

    let levels = merge(&batch.records, &files, &durations, EnvelopeMode::Level);
    let csv_path = out_path(".csv");
    write_csv_file(&csv_path, &levels, decimals)
        .with_context(|| format!("failed to write envelope: {}", csv_path.display()))?;
    run_log.push_output(&csv_path);

    if config.output.timings {
        let timings = merge(&batch.records, &files, &durations, EnvelopeMode::Timing);
        let timing_path = out_path("_timing.csv");
        write_csv_file(&timing_path, &timings, decimals)
            .with_context(|| format!("failed to write timings: {}", timing_path.display()))?;
        run_log.push_output(&timing_path);
    }

    if let Some(source) = projection {
        let geojson_path = out_path(".geojson");
        write_geojson(&geojson_path, &source, &batch)?;
        run_log.push_output(&geojson_path);
    }

    // 7. Final run log
    run_log.push_output(&log_path);
    run_log.write(&log_path)?;

    info!(n_locations = levels.len(), "done");
    Ok(())
}

/// File list wins over directory scan; a scan yields unlabelled inputs.
fn resolve_inputs(args: &ExtractArgs, config: &CrestConfig) -> Result<Vec<InputFile>> {
    let inputs = if let Some(list) = &args.files {
        read_file_list(list)
            .with_context(|| format!("failed to read file list: {}", list.display()))?
    } else if let Some(dir) = &args.input_directory {
        let discover_cfg = convert::build_discover_config(&config.discover, args.subdir);
        discover(dir, &discover_cfg)
            .with_context(|| format!("failed to scan input directory: {}", dir.display()))?
            .into_iter()
            .map(|path| InputFile::new(path, None))
            .collect()
    } else {
        bail!("no inputs: use --files or --input-directory");
    };
    if inputs.is_empty() {
        bail!("no result files to process");
    }
    Ok(inputs)
}

#[cfg(feature = "proj")]
fn write_geojson(path: &Path, source: &str, batch: &BatchExtraction) -> Result<()> {
    let transform = crest_envelope::ProjTransform::new(source)?;
    info!(
        source = transform.source(),
        target = crest_envelope::TARGET_CRS,
        "projecting GeoJSON points"
    );
    crest_envelope::write_geojson_file(path, &batch.records, &transform)
        .with_context(|| format!("failed to write GeoJSON: {}", path.display()))
}

#[cfg(not(feature = "proj"))]
fn write_geojson(path: &Path, _source: &str, _batch: &BatchExtraction) -> Result<()> {
    bail!("cannot write {}: built without the `proj` feature", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH_DOC: &str = r#"{
      "projection": "LOCAL",
      "nodes": [
        { "id": "MH1", "x": 1.0, "y": 2.0, "bottom_level": 0.5,
          "data_items": [ { "quantity": "WaterLevel", "series": [[1.0, 3.0, 2.0]] } ] }
      ]
    }"#;

    fn args(files: PathBuf, output_name: PathBuf) -> ExtractArgs {
        ExtractArgs {
            config: None,
            files: Some(files),
            input_directory: None,
            subdir: false,
            output_name: Some(output_name),
            projection: None,
            no_round_outputs: false,
            include_timings: false,
            description: Some("test run".into()),
        }
    }

    fn read_log(path: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn failed_run_still_leaves_a_log() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("files.txt");
        let missing = dir.path().join("missing.prf");
        std::fs::write(&list, format!("{} 1h\n", missing.display())).unwrap();

        let out = dir.path().join("out").join("envelope");
        let err = run(args(list, out)).unwrap_err();
        assert!(format!("{err:#}").contains("could be loaded"));

        let log = read_log(&dir.path().join("out").join("envelope.log"));
        assert_eq!(log["description"], "test run");
        assert_eq!(log["license"], "TBC");
        assert_eq!(log["critical_durations"][0], "1h");
        assert_eq!(log["output_files"].as_array().unwrap().len(), 0);
        assert!(!dir.path().join("out").join("envelope.csv").exists());
    }

    #[test]
    fn successful_run_lists_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let result = dir.path().join("run_2h.prf");
        std::fs::write(&result, GRAPH_DOC).unwrap();
        let list = dir.path().join("files.txt");
        std::fs::write(&list, format!("{} 2h\n", result.display())).unwrap();

        let out = dir.path().join("envelope");
        run(args(list, out)).unwrap();

        let csv = std::fs::read_to_string(dir.path().join("envelope.csv")).unwrap();
        assert_eq!(csv.lines().nth(1).unwrap(), "MH1,prf,1,2,0.5,3,3,2.5,2h");

        let log = read_log(&dir.path().join("envelope.log"));
        assert_eq!(log["model_projection"], "LOCAL");
        let outputs = log["output_files"].as_array().unwrap();
        assert_eq!(outputs.len(), 2);
        assert!(outputs[1].as_str().unwrap().ends_with("envelope.log"));
    }
}
