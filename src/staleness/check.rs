use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};

use super::{FileCheck, StalenessReport};
use crate::metadata::{FileId, FileIdKey};
use crate::reader::ArtifactReader;

/// Map of raw file base names to the compared key value
pub type IdMap = BTreeMap<String, i64>;

fn base_name(fid: &FileId) -> String {
    Path::new(&fid.full_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| fid.name.clone())
}

/// Key values of a set of file ids, by base name
pub fn file_id_map(files: &[FileId], key: FileIdKey) -> IdMap {
    files
        .iter()
        .map(|fid| (base_name(fid), fid.key_value(key)))
        .collect()
}

/// Current file ids of raw files; files that cannot be stat'ed are skipped
pub fn raw_file_ids<P: AsRef<Path>>(files: &[P]) -> Vec<FileId> {
    let mut ids = Vec::with_capacity(files.len());
    for file in files {
        let file = file.as_ref();
        match FileId::from_path(file) {
            Ok(fid) => ids.push(fid),
            Err(e) => warn!("Skipping raw file {}: {}", file.display(), e),
        }
    }
    ids
}

/// Equal when both maps are non-empty, equally large and agree per name
pub fn compare_ids(current: &IdMap, recorded: &IdMap) -> bool {
    if current.is_empty() || current.len() != recorded.len() {
        return false;
    }
    current
        .iter()
        .all(|(name, value)| recorded.get(name) == Some(value))
}

/// Compare current raw file ids with the ids recorded in an artifact.
///
/// `recorded` is `None` when the artifact has no file id table, which
/// always makes it stale.
pub fn check_file_ids(
    current: &[FileId],
    recorded: Option<&[FileId]>,
    key: FileIdKey,
    artifact: &str,
) -> StalenessReport {
    let mut report = StalenessReport::new(artifact, key);
    let recorded = match recorded {
        Some(recorded) => recorded,
        None => {
            warn!("{} has no file id table and should be rebuilt", artifact);
            report.add_check(FileCheck::failed("file id table", "not recorded"));
            return report;
        }
    };

    let current_map = file_id_map(current, key);
    let recorded_map = file_id_map(recorded, key);

    for (name, value) in &current_map {
        match recorded_map.get(name) {
            Some(old) if old == value => report.add_check(FileCheck::ok(name.as_str())),
            Some(old) => report.add_check(FileCheck::failed(
                name.as_str(),
                format!("{} was {}, now {}", key, old, value),
            )),
            None => report.add_check(FileCheck::failed(name.as_str(), "not in artifact")),
        }
    }
    for name in recorded_map.keys() {
        if !current_map.contains_key(name) {
            report.add_check(FileCheck::failed(name.as_str(), "recorded but not given"));
        }
    }

    report.up_to_date = compare_ids(&current_map, &recorded_map);
    debug!(
        "{} is {}",
        artifact,
        if report.up_to_date { "up to date" } else { "stale" }
    );
    report
}

/// Decide whether an artifact can be reused for a set of raw files
pub fn check_artifact<P, Q>(raw_files: &[P], artifact: Q, key: FileIdKey) -> StalenessReport
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let artifact = artifact.as_ref();
    let label = artifact.display().to_string();
    info!("Checking file ids of {} using '{}'", label, key);

    if !artifact.is_file() {
        debug!("{} does not exist", label);
        let mut report = StalenessReport::new(label, key);
        report.add_check(FileCheck::failed("artifact", "does not exist"));
        return report;
    }

    let recorded = ArtifactReader::open(artifact).and_then(|mut reader| reader.read_file_ids());
    let recorded = match recorded {
        Ok(recorded) => recorded,
        Err(e) => {
            warn!("Cannot read file ids from {}: {}", label, e);
            let mut report = StalenessReport::new(label, key);
            report.add_check(FileCheck::failed("artifact", e.to_string()));
            return report;
        }
    };

    let current = raw_file_ids(raw_files);
    let mut report = check_file_ids(&current, recorded.as_deref(), key, &label);
    for file in raw_files {
        let file = file.as_ref();
        if !file.is_file() {
            report.add_check(FileCheck::warning(
                file.display().to_string(),
                "raw file not found",
            ));
        }
    }
    report
}
