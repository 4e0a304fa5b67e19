//! # cellpeak Dataset Module
//!
//! A [`Dataset`] is one cycling test: the raw measurements together with the
//! tables derived from them and the provenance of the raw files.
//!
//! ```text
//! Dataset
//! ├── raw        RawTable (None = empty dataset)
//! ├── steps      StepTable (set by the step classifier)
//! ├── summary    SummaryTable (set by the summary engine)
//! ├── info       name, mass, start time, ...
//! └── raw_data_files / raw_data_files_length
//! ```
//!
//! Several captures of the same test are combined with [`merge`], which
//! keeps data point and cycle numbering monotonic.

mod error;
mod merge;
mod raw;

#[cfg(test)]
mod tests;

pub use error::DatasetError;
pub use merge::{merge, MergeGuard};
pub use raw::{RawRow, RawTable};

use crate::metadata::{specific_converter, DatasetInfo, FileId, RawLimits, RawUnits, TargetUnits};
use crate::steps::StepTable;
use crate::summary::SummaryTable;

/// One cycling test and everything derived from it
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Raw measurements, `None` for an empty dataset
    pub raw: Option<RawTable>,

    /// Step classification, present once made
    pub steps: Option<StepTable>,

    /// Per-cycle summary, present once made
    pub summary: Option<SummaryTable>,

    /// Data points of externally supplied per-cycle statistics rows
    pub stat_data_points: Option<Vec<i64>>,

    /// Descriptive information
    pub info: DatasetInfo,

    /// Units of the raw columns
    pub raw_units: RawUnits,

    /// Classification limits of the instrument
    pub raw_limits: RawLimits,

    /// Provenance of every raw file, in load order
    pub raw_data_files: Vec<FileId>,

    /// Number of rows contributed by each raw file
    pub raw_data_files_length: Vec<usize>,

    /// Whether the dataset is the result of a merge
    pub merged: bool,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new(info: DatasetInfo) -> Self {
        Self {
            info,
            ..Default::default()
        }
    }

    /// Create a dataset around raw measurements
    pub fn from_raw(raw: RawTable, info: DatasetInfo) -> Self {
        Self {
            raw: Some(raw),
            info,
            ..Default::default()
        }
    }

    /// Whether the dataset has no raw data
    pub fn is_empty(&self) -> bool {
        self.raw.as_ref().map_or(true, |raw| raw.is_empty())
    }

    /// Raw measurements, or [`DatasetError::EmptyDataset`]
    pub fn raw(&self) -> Result<&RawTable, DatasetError> {
        match &self.raw {
            Some(raw) if !raw.is_empty() => Ok(raw),
            _ => Err(DatasetError::EmptyDataset),
        }
    }

    /// Whether a step table has been made
    pub fn step_table_made(&self) -> bool {
        self.steps.is_some()
    }

    /// Whether a summary has been made
    pub fn summary_made(&self) -> bool {
        self.summary.is_some()
    }

    /// Largest cycle number, 0 for an empty dataset
    pub fn no_cycles(&self) -> i32 {
        self.raw
            .as_ref()
            .and_then(|raw| raw.max_cycle())
            .unwrap_or(0)
    }

    /// Sorted distinct cycle numbers
    pub fn cycle_numbers(&self) -> Vec<i32> {
        self.raw.as_ref().map(|raw| raw.cycles()).unwrap_or_default()
    }

    /// Factor converting raw capacities of this test into specific capacities
    pub fn specific_converter(&self, target: &TargetUnits) -> f64 {
        specific_converter(&self.raw_units, target, self.info.mass)
    }
}
