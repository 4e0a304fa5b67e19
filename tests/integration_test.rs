//! Integration tests for cellPeak
//!
//! These tests drive the full pipeline from raw CSV exports to a saved
//! artifact and back out as CSV.

use cellpeak::collection::{CellData, LoadCellOptions};
use cellpeak::config::PipelineConfig;
use cellpeak::curves::CurveMethod;
use cellpeak::export::{write_raw, ExportOptions};
use cellpeak::metadata::FileIdKey;
use cellpeak::reader::ArtifactReader;
use cellpeak::schema::summary_columns as col;
use cellpeak::staleness::check_artifact;
use cellpeak::synthetic::SyntheticCell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_raw_csv(dir: &Path, name: &str, cycles: usize) -> PathBuf {
    let raw = SyntheticCell {
        cycles,
        ..Default::default()
    }
    .build_raw();
    let path = dir.join(name);
    let mut writer = csv::Writer::from_writer(File::create(&path).unwrap());
    write_raw(&raw, &mut writer).unwrap();
    writer.flush().unwrap();
    path
}

/// Raw files to artifact, then reuse of the up to date artifact
#[test]
fn test_process_and_reuse() {
    let dir = tempdir().unwrap();
    let raw = vec![
        write_raw_csv(dir.path(), "cell_01.csv", 4),
        write_raw_csv(dir.path(), "cell_02.csv", 2),
    ];
    let artifact = dir.path().join("cell.cellpeak");

    let mut cell = CellData::new(PipelineConfig::default());
    let reused = cell
        .loadcell(&raw, Some(artifact.as_path()), Some(2.0), &LoadCellOptions::default())
        .unwrap();
    assert!(!reused);
    assert_eq!(cell.get_number_of_cycles(None), Some(6));
    assert_eq!(cell.get_mass(None), Some(2.0));

    cell.make_step_table(None).unwrap();
    cell.make_summary_of(None).unwrap();
    let stats = cell.save(&artifact, false, false).unwrap().unwrap();
    assert_eq!(stats.raw_rows, 240);
    assert_eq!(stats.summary_rows, 6);
    assert_eq!(stats.file_ids, 2);

    // Unchanged raw files: the artifact is current
    let report = check_artifact(&raw, &artifact, FileIdKey::Size);
    assert!(report.up_to_date, "{}", report);

    let mut again = CellData::new(PipelineConfig::default());
    let reused = again
        .loadcell(&raw, Some(artifact.as_path()), None, &LoadCellOptions::default())
        .unwrap();
    assert!(reused);
    let dataset = &again.datasets()[0];
    assert!(dataset.merged);
    assert_eq!(dataset.raw_data_files_length, vec![160, 80]);
    assert_eq!(dataset.info.mass, 2.0);
    assert_eq!(
        dataset.summary.as_ref().unwrap().len(),
        cell.datasets()[0].summary.as_ref().unwrap().len()
    );
}

/// Appending rows to a raw file makes the artifact stale
#[test]
fn test_changed_raw_file_triggers_reload() {
    let dir = tempdir().unwrap();
    let raw = vec![write_raw_csv(dir.path(), "cell.csv", 2)];
    let artifact = dir.path().join("cell.cellpeak");

    let mut cell = CellData::default();
    cell.loadcell(&raw, Some(artifact.as_path()), None, &LoadCellOptions::default())
        .unwrap();
    cell.make_summary_of(None).unwrap();
    cell.save(&artifact, false, false).unwrap();

    write_raw_csv(dir.path(), "cell.csv", 3);
    let report = check_artifact(&raw, &artifact, FileIdKey::Size);
    assert!(report.is_stale());

    let mut again = CellData::default();
    let reused = again
        .loadcell(&raw, Some(artifact.as_path()), None, &LoadCellOptions::default())
        .unwrap();
    assert!(!reused);
    assert_eq!(again.get_number_of_cycles(None), Some(3));
}

/// Summary values follow the synthetic capacities
#[test]
fn test_summary_values() {
    let dir = tempdir().unwrap();
    let raw = vec![write_raw_csv(dir.path(), "cell.csv", 5)];

    let mut cell = CellData::default();
    cell.from_raw(&raw).unwrap();
    cell.make_summary_of(None).unwrap();

    let summary = cell.get_summary(None).unwrap();
    assert_eq!(summary.cycle_index, vec![1, 2, 3, 4, 5]);

    let discharge = summary.get(col::DISCHARGE_CAPACITY).unwrap();
    let cumulated = summary.get(col::CUMULATED_DISCHARGE_CAPACITY).unwrap();
    let mut total = 0.0;
    for (value, cum) in discharge.iter().zip(cumulated) {
        total += value;
        assert!((total - cum).abs() < 1e-9);
    }
    // capacity fades from cycle to cycle
    assert!(discharge.windows(2).all(|w| w[1] < w[0]));

    for efficiency in summary.get(col::COULOMBIC_EFFICIENCY).unwrap() {
        assert!((efficiency - 98.0).abs() < 1e-6);
    }
    assert!(summary.get(col::IR_CHARGE).is_some());
    assert!(summary.get(col::END_VOLTAGE_DISCHARGE).is_some());
}

/// Steps are classified and curves extracted from the processed cell
#[test]
fn test_steps_and_curves() {
    let dir = tempdir().unwrap();
    let raw = vec![write_raw_csv(dir.path(), "cell.csv", 3)];

    let mut cell = CellData::default();
    cell.from_raw(&raw).unwrap();
    cell.make_step_table(None).unwrap();

    let charge = cell
        .get_step_numbers("charge", false, Some(2), None)
        .unwrap()
        .unwrap();
    assert_eq!(charge.get(&2), Some(&vec![4]));
    let discharge = cell
        .get_step_numbers("discharge", false, None, None)
        .unwrap()
        .unwrap();
    assert_eq!(discharge.len(), 3);

    let curves = cell
        .get_cap(Some(&[1, 2]), CurveMethod::BackAndForth, 0.0, None)
        .unwrap()
        .unwrap();
    assert_eq!(curves.len(), 2);
    assert_eq!(curves[1].cycle, 2);
    assert!(curves[0].first.len() >= 2);
    assert!(curves[0].second.len() >= 2);
}

/// Artifact to CSV files
#[test]
fn test_export_from_artifact() {
    let dir = tempdir().unwrap();
    let raw = vec![write_raw_csv(dir.path(), "cell.csv", 3)];
    let artifact = dir.path().join("cell.cellpeak");

    let mut cell = CellData::default();
    cell.from_raw(&raw).unwrap();
    cell.make_summary_of(None).unwrap();
    cell.save(&artifact, false, true).unwrap();

    let mut loaded = CellData::default();
    loaded.load(&artifact).unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    let options = ExportOptions {
        cycles: true,
        ..Default::default()
    };
    let written = loaded.to_csv(&out, &options).unwrap();
    assert_eq!(written.len(), 4);
    for path in &written {
        assert!(path.exists(), "{} missing", path.display());
    }

    let stats = fs::read_to_string(out.join("cell_stats.csv")).unwrap();
    assert_eq!(stats.lines().count(), 4);
    assert!(stats.lines().next().unwrap().contains(col::COULOMBIC_EFFICIENCY));
}

/// The reader sees every table written by a saved cell
#[test]
fn test_reader_tables() {
    let dir = tempdir().unwrap();
    let raw = vec![write_raw_csv(dir.path(), "cell.csv", 2)];
    let artifact = dir.path().join("cell.cellpeak");

    let mut cell = CellData::default();
    cell.from_raw(&raw).unwrap();
    cell.make_summary_of(None).unwrap();
    cell.save(&artifact, false, true).unwrap();

    let mut reader = ArtifactReader::open(&artifact).unwrap();
    assert!(reader.info().summary_made);
    assert!(reader.info().step_table_made);
    assert_eq!(reader.read_raw().unwrap().len(), 80);
    assert_eq!(reader.read_steps().unwrap().unwrap().len(), 8);
    assert_eq!(reader.read_summary().unwrap().unwrap().len(), 2);
    let file_ids = reader.read_file_ids().unwrap().unwrap();
    assert_eq!(file_ids.len(), 1);
    assert_eq!(file_ids[0].name, "cell.csv");
}
