//! Contents of the `info.json` entry of a cellpeak artifact.
//!
//! The entry carries everything about a dataset that is not a table, so a
//! reader can check the version and flags before decoding any Parquet.

use serde::{Deserialize, Serialize};

use super::constants::FILE_VERSION;
use crate::metadata::{DatasetInfo, RawLimits, RawUnits};

/// Dataset information stored next to the tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    /// Artifact file version
    pub file_version: u32,
    /// Name and version of the writer
    pub converter: String,
    /// Descriptive dataset information
    pub info: DatasetInfo,
    /// Unit fractions of the raw data
    pub raw_units: RawUnits,
    /// Classification limits of the instrument
    pub raw_limits: RawLimits,
    /// Row count contributed by every raw file
    #[serde(default)]
    pub raw_data_files_length: Vec<usize>,
    /// Whether the dataset was merged from several captures
    #[serde(default)]
    pub merged: bool,
    /// Whether the step table entry is present
    pub step_table_made: bool,
    /// Whether the summary entry holds a made summary
    pub summary_made: bool,
    /// Data points of externally supplied statistics rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_data_points: Option<Vec<i64>>,
}

impl ArtifactInfo {
    /// Info for a dataset written by this version of the crate
    pub fn new(info: DatasetInfo, raw_units: RawUnits, raw_limits: RawLimits) -> Self {
        Self {
            file_version: FILE_VERSION,
            converter: format!("cellpeak {}", env!("CARGO_PKG_VERSION")),
            info,
            raw_units,
            raw_limits,
            raw_data_files_length: Vec::new(),
            merged: false,
            step_table_made: false,
            summary_made: false,
            stat_data_points: None,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
