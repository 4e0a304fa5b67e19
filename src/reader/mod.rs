//! # cellpeak Reader Module
//!
//! Reads `.cellpeak` artifacts back into a [`Dataset`].
//!
//! Opening an artifact reads `info.json` and checks the file version, so a
//! file from an incompatible version fails with
//! [`ReaderError::WrongFileVersion`] before any table is decoded.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cellpeak::reader::ArtifactReader;
//!
//! let mut reader = ArtifactReader::open("cell.cellpeak")?;
//! println!("File version: {}", reader.info().file_version);
//!
//! let dataset = reader.into_dataset()?;
//! println!("{} cycles", dataset.no_cycles());
//! # Ok::<(), cellpeak::reader::ReaderError>(())
//! ```

mod error;
mod open;
mod tables;
mod utils;


use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::debug;
use zip::ZipArchive;

pub use error::ReaderError;
pub use tables::{decode_file_ids, decode_raw, decode_steps, decode_summary};

use crate::dataset::{Dataset, RawTable};
use crate::metadata::FileId;
use crate::schema::{ArtifactInfo, ENTRY_FID, ENTRY_RAW, ENTRY_STEPS, ENTRY_SUMMARY};
use crate::steps::StepTable;
use crate::summary::SummaryTable;

/// Reader for `.cellpeak` artifacts
pub struct ArtifactReader {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    info: ArtifactInfo,
}

impl ArtifactReader {
    /// Path the artifact was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Dataset information of the artifact
    pub fn info(&self) -> &ArtifactInfo {
        &self.info
    }

    /// Names of the container entries
    pub fn entries(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// The raw table
    pub fn read_raw(&mut self) -> Result<RawTable, ReaderError> {
        let batches = self
            .read_batches(ENTRY_RAW)?
            .ok_or_else(|| ReaderError::CorruptArtifact(format!("missing {}", ENTRY_RAW)))?;
        decode_raw(&batches)
    }

    /// The summary, `None` when it was saved without being made
    pub fn read_summary(&mut self) -> Result<Option<SummaryTable>, ReaderError> {
        let batches = self
            .read_batches(ENTRY_SUMMARY)?
            .ok_or_else(|| ReaderError::CorruptArtifact(format!("missing {}", ENTRY_SUMMARY)))?;
        if !self.info.summary_made {
            return Ok(None);
        }
        decode_summary(&batches).map(Some)
    }

    /// The step table, `None` when it was not made
    pub fn read_steps(&mut self) -> Result<Option<StepTable>, ReaderError> {
        match self.read_batches(ENTRY_STEPS)? {
            Some(batches) => decode_steps(&batches).map(Some),
            None => Ok(None),
        }
    }

    /// Recorded raw files with their row counts, `None` without a provenance table
    pub fn read_file_ids(&mut self) -> Result<Option<Vec<FileId>>, ReaderError> {
        match self.read_batches(ENTRY_FID)? {
            Some(batches) => Ok(Some(decode_file_ids(&batches)?.0)),
            None => Ok(None),
        }
    }

    /// Decode every table into a dataset
    pub fn into_dataset(mut self) -> Result<Dataset, ReaderError> {
        let raw = self.read_raw()?;
        let summary = self.read_summary()?;
        let steps = self.read_steps()?;
        let (raw_data_files, lengths) = match self.read_batches(ENTRY_FID)? {
            Some(batches) => decode_file_ids(&batches)?,
            None => (Vec::new(), Vec::new()),
        };

        let info = self.info;
        let mut dataset = Dataset::from_raw(raw, info.info);
        dataset.summary = summary;
        dataset.steps = steps;
        dataset.stat_data_points = info.stat_data_points;
        dataset.raw_units = info.raw_units;
        dataset.raw_limits = info.raw_limits;
        dataset.raw_data_files = raw_data_files;
        dataset.raw_data_files_length = if info.raw_data_files_length.is_empty() {
            lengths
        } else {
            info.raw_data_files_length
        };
        dataset.merged = info.merged;
        debug!(
            "Loaded '{}' from {}",
            dataset.info.name,
            self.path.display()
        );
        Ok(dataset)
    }
}
