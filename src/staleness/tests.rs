use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::metadata::{FileId, FileIdKey};
use crate::summary::{make_summary, SummaryOptions};
use crate::synthetic::SyntheticCell;
use crate::writer::ArtifactWriter;

fn fid(name: &str, size: u64) -> FileId {
    FileId {
        name: name.to_string(),
        full_name: format!("/somewhere/{}", name),
        size,
        ..Default::default()
    }
}

fn write_raw(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn save_artifact(raw_files: &[PathBuf], artifact: &Path) {
    let mut dataset = SyntheticCell {
        cycles: 2,
        ..Default::default()
    }
    .build_dataset("stale");
    dataset.raw_data_files = raw_files
        .iter()
        .map(|p| FileId::from_path(p).unwrap())
        .collect();
    dataset.raw_data_files_length = vec![80 / raw_files.len(); raw_files.len()];
    make_summary(&mut dataset, &SummaryOptions::default()).unwrap();
    ArtifactWriter::default().save(&dataset, artifact, false).unwrap();
}

#[test]
fn test_compare_ids() {
    let a = file_id_map(&[fid("a.res", 10), fid("b.res", 20)], FileIdKey::Size);
    let same = file_id_map(&[fid("b.res", 20), fid("a.res", 10)], FileIdKey::Size);
    let changed = file_id_map(&[fid("a.res", 10), fid("b.res", 21)], FileIdKey::Size);
    let renamed = file_id_map(&[fid("a.res", 10), fid("c.res", 20)], FileIdKey::Size);
    let fewer = file_id_map(&[fid("a.res", 10)], FileIdKey::Size);

    assert!(compare_ids(&a, &same));
    assert!(!compare_ids(&a, &changed));
    assert!(!compare_ids(&a, &renamed));
    assert!(!compare_ids(&a, &fewer));
    assert!(!compare_ids(&IdMap::new(), &IdMap::new()));
}

#[test]
fn test_map_uses_base_name() {
    let map = file_id_map(&[fid("cell.res", 5)], FileIdKey::Size);
    assert_eq!(map.get("cell.res"), Some(&5));
}

#[test]
fn test_missing_fid_table_is_stale() {
    let report = check_file_ids(&[fid("a.res", 1)], None, FileIdKey::Size, "x.cellpeak");
    assert!(report.is_stale());
    assert_eq!(report.failure_count(), 1);
}

#[test]
fn test_check_file_ids_report() {
    let recorded = [fid("a.res", 10), fid("b.res", 20)];
    let current = [fid("a.res", 10), fid("b.res", 25)];
    let report = check_file_ids(&current, Some(&recorded[..]), FileIdKey::Size, "x.cellpeak");
    assert!(report.is_stale());
    assert_eq!(report.success_count(), 1);
    assert_eq!(report.failure_count(), 1);

    let report = check_file_ids(&recorded, Some(&recorded[..]), FileIdKey::Size, "x.cellpeak");
    assert!(report.up_to_date);
    assert!(report.to_string().contains("UP TO DATE"));
}

#[test]
fn test_missing_artifact_is_stale() {
    let dir = tempdir().unwrap();
    let raw = write_raw(dir.path(), "cell.res", "data");
    let report = check_artifact(&[raw], dir.path().join("nope.cellpeak"), FileIdKey::Size);
    assert!(report.is_stale());
    assert!(report.to_string().contains("STALE"));
}

#[test]
fn test_check_is_idempotent() {
    let dir = tempdir().unwrap();
    let raw = vec![
        write_raw(dir.path(), "cell_01.res", "first part"),
        write_raw(dir.path(), "cell_02.res", "second part"),
    ];
    let artifact = dir.path().join("cell.cellpeak");
    save_artifact(&raw, &artifact);

    let first = check_artifact(&raw, &artifact, FileIdKey::Size);
    let second = check_artifact(&raw, &artifact, FileIdKey::Size);
    assert!(first.up_to_date);
    assert_eq!(first.up_to_date, second.up_to_date);
    assert_eq!(first.checks, second.checks);
}

#[test]
fn test_changed_raw_file_is_stale() {
    let dir = tempdir().unwrap();
    let raw = vec![write_raw(dir.path(), "cell.res", "short")];
    let artifact = dir.path().join("cell.cellpeak");
    save_artifact(&raw, &artifact);

    fs::write(&raw[0], "a good deal longer than before").unwrap();
    let report = check_artifact(&raw, &artifact, FileIdKey::Size);
    assert!(report.is_stale());
    assert_eq!(report.failure_count(), 1);
}

#[test]
fn test_vanished_raw_file_is_stale() {
    let dir = tempdir().unwrap();
    let raw = vec![
        write_raw(dir.path(), "cell_01.res", "first part"),
        write_raw(dir.path(), "cell_02.res", "second part"),
    ];
    let artifact = dir.path().join("cell.cellpeak");
    save_artifact(&raw, &artifact);

    fs::remove_file(&raw[1]).unwrap();
    let report = check_artifact(&raw, &artifact, FileIdKey::Size);
    assert!(report.is_stale());
    assert_eq!(report.warning_count(), 1);
}

#[test]
fn test_artifact_without_fid_table_is_stale() {
    let dir = tempdir().unwrap();
    let raw = write_raw(dir.path(), "cell.res", "data");
    let artifact = dir.path().join("cell.cellpeak");
    let mut dataset = SyntheticCell::default().build_dataset("no fids");
    make_summary(&mut dataset, &SummaryOptions::default()).unwrap();
    ArtifactWriter::default().save(&dataset, &artifact, false).unwrap();

    assert!(check_artifact(&[raw], &artifact, FileIdKey::Size).is_stale());
}
