use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::{CellData, CellDataError};
use crate::curves::CurveOptions;
use crate::dataset::{merge, Dataset, DatasetError, MergeGuard};
use crate::export::{to_csv, ExportOptions};
use crate::reader::ArtifactReader;
use crate::staleness::check_artifact;
use crate::steps::ensure_step_table;
use crate::writer::{ArtifactWriter, WriterStats};

/// Options of [`CellData::loadcell`]
#[derive(Debug, Clone, Default)]
pub struct LoadCellOptions {
    /// Load the raw files even when the artifact is up to date
    pub force_raw: bool,
    /// Make the summary after loading raw files
    pub summary_on_raw: bool,
}

impl CellData {
    /// Load raw files into one new dataset.
    ///
    /// Files after the first are appended with [`merge`]; the number of
    /// appended files is limited by `max_merge_files`. Only the first test
    /// of a multi-test file is used.
    pub fn from_raw<P: AsRef<Path>>(&mut self, files: &[P]) -> Result<(), CellDataError> {
        if files.is_empty() {
            return Err(CellDataError::NoRawFiles);
        }
        let mut guard = MergeGuard::new(self.config.reader.max_merge_files);
        let mut test: Option<Dataset> = None;

        for file in files {
            let file = file.as_ref();
            debug!("Loading raw file {}", file.display());
            let mut loaded = self.loader.load(file)?;
            if loaded.is_empty() {
                warn!("{} contains no tests", file.display());
                continue;
            }
            let new_test = loaded.swap_remove(0);
            test = match test {
                None => Some(new_test),
                Some(current) if new_test.is_empty() => {
                    warn!("Skipping empty raw file {}", file.display());
                    Some(current)
                }
                Some(current) if current.is_empty() => Some(new_test),
                Some(current) => {
                    for _ in &new_test.raw_data_files {
                        guard.register()?;
                    }
                    Some(merge(current, new_test)?)
                }
            };
        }

        match test {
            Some(mut dataset) => {
                if !self.config.reader.sorted_data {
                    debug!("Sorting raw data");
                    if let Some(raw) = dataset.raw.as_mut() {
                        raw.sort_by_data_point();
                    }
                }
                if dataset.is_empty() {
                    warn!("Empty run!");
                }
                self.datasets.push(dataset);
            }
            None => warn!("No new datasets added!"),
        }
        Ok(())
    }

    /// Load a saved artifact as a new dataset
    pub fn load<P: AsRef<Path>>(&mut self, artifact: P) -> Result<(), CellDataError> {
        let artifact = artifact.as_ref();
        let mut dataset = ArtifactReader::open(artifact)?.into_dataset()?;
        dataset.info.loaded_from = Some(artifact.display().to_string());
        if self.config.reader.force_step_table_creation && !dataset.step_table_made() {
            info!("No step table in {}, making it", artifact.display());
            if let Err(e) = ensure_step_table(&mut dataset) {
                warn!("Could not make step table: {}", e);
            }
        }
        self.datasets.push(dataset);
        Ok(())
    }

    /// Load a cell from its artifact when that is up to date, else from raw.
    ///
    /// Returns `true` when the artifact was reused.
    pub fn loadcell<P: AsRef<Path>>(
        &mut self,
        raw_files: &[P],
        artifact: Option<&Path>,
        mass: Option<f64>,
        options: &LoadCellOptions,
    ) -> Result<bool, CellDataError> {
        info!("Started loadcell");
        let up_to_date = match artifact {
            Some(artifact) if !options.force_raw => {
                check_artifact(raw_files, artifact, self.config.reader.file_id_key).up_to_date
            }
            _ => false,
        };

        if let (true, Some(artifact)) = (up_to_date, artifact) {
            self.load(artifact)?;
            return Ok(true);
        }

        info!("Artifact needs updating, loading raw files");
        let before = self.datasets.len();
        self.from_raw(raw_files)?;
        if self.datasets.len() == before || !self.check() {
            warn!("Empty run!");
            return Ok(false);
        }
        let number = Some(self.datasets.len() - 1);
        if let Some(mass) = mass {
            self.set_mass(mass, number);
        }
        if options.summary_on_raw {
            self.make_summary_of(number)?;
        }
        Ok(false)
    }

    /// Save the first dataset as an artifact.
    ///
    /// Without a summary `force` is needed. With `ensure_step_table` a
    /// missing step table is made first.
    pub fn save<P: AsRef<Path>>(
        &mut self,
        path: P,
        force: bool,
        ensure_step_table: bool,
    ) -> Result<Option<WriterStats>, CellDataError> {
        let writer = ArtifactWriter::new(self.config.writer.clone());
        let dataset = match self.dataset_mut(None) {
            Some(dataset) => dataset,
            None => {
                info!("Nothing to save");
                return Ok(None);
            }
        };
        if ensure_step_table {
            crate::steps::ensure_step_table(dataset)?;
        }
        let stats = writer.save(dataset, path, force)?;
        Ok(Some(stats))
    }

    /// Merge datasets into one, replacing the collection.
    ///
    /// `indices` selects and orders the datasets, every dataset when `None`.
    pub fn merge(&mut self, indices: Option<&[usize]>) -> Result<(), CellDataError> {
        info!("Merging");
        let indices: Vec<usize> = match indices {
            Some(indices) => indices.to_vec(),
            None => (0..self.datasets.len()).collect(),
        };
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.datasets.len()) {
            return Err(DatasetError::InvalidIndex(bad).into());
        }

        // merge copies so a failure leaves the collection as it was
        let mut used = vec![false; self.datasets.len()];
        let mut merged: Option<Dataset> = None;
        for index in indices {
            if std::mem::replace(&mut used[index], true) {
                continue;
            }
            let next = self.datasets[index].clone();
            merged = Some(match merged {
                None => next,
                Some(current) => merge(current, next).map_err(|err| {
                    warn!("Merge failed at dataset {}: {}", index, err);
                    err
                })?,
            });
        }
        self.datasets = merged.into_iter().collect();
        Ok(())
    }

    /// Export every non-empty dataset as CSV files in `out_dir`
    pub fn to_csv<P: AsRef<Path>>(
        &self,
        out_dir: P,
        options: &ExportOptions,
    ) -> Result<Vec<PathBuf>, CellDataError> {
        let curve_options = CurveOptions {
            cycle_mode: self.config.reader.cycle_mode,
            target_units: self.config.summary.target_units,
            ..Default::default()
        };
        let mut written = Vec::new();
        for (number, dataset) in self.datasets.iter().enumerate() {
            if dataset.is_empty() {
                info!("Dataset {} is empty, not exported", number);
                continue;
            }
            match to_csv(dataset, out_dir.as_ref(), options, &curve_options) {
                Ok(paths) => written.extend(paths),
                Err(e) => warn!("Could not export dataset {}: {}", number, e),
            }
        }
        Ok(written)
    }
}
