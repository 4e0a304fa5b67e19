//! TOML configuration of the processing pipeline.
//!
//! Every field has a default, so an empty file or a missing section is
//! valid:
//!
//! ```toml
//! # cellpeak.toml
//! [reader]
//! cycle_mode = "anode"
//! daniel_number = 5
//! file_id_key = "size"
//! max_merge_files = 10
//! sep = ","
//!
//! [instrument.raw_units]
//! current = 1.0
//! charge = 1.0
//! mass = 0.001
//!
//! [summary]
//! find_ocv = false
//! find_ir = true
//!
//! [writer]
//! compression = "zstd"
//! zstd_level = 9
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::metadata::{CycleMode, FileIdKey, RawLimits, RawUnits, TargetUnits};
use crate::summary::{SummaryOptions, DEFAULT_DANIEL_NUMBER};
use crate::writer::WriterConfig;

/// Errors that can occur while loading a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid TOML for this configuration
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The separator is not a single byte
    #[error("Invalid separator '{0}', expected a single character")]
    InvalidSeparator(String),
}

/// Root configuration of the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Loading and classification settings
    pub reader: ReaderConfig,
    /// Instrument parameters
    pub instrument: InstrumentConfig,
    /// Summary engine settings
    pub summary: SummaryConfig,
    /// Artifact writer settings
    pub writer: WriterConfig,
}

/// Loading and classification settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Which half-cycle comes first
    pub cycle_mode: CycleMode,
    /// Reference cycle for the irreversible capacity levels
    pub daniel_number: i32,
    /// File id attribute used by the staleness check
    pub file_id_key: FileIdKey,
    /// Make the step table before every summary
    pub ensure_step_table: bool,
    /// Make a missing step table when loading an artifact
    pub force_step_table_creation: bool,
    /// Maximum number of raw files appended into one dataset
    pub max_merge_files: usize,
    /// Raw rows are already sorted by data point
    pub sorted_data: bool,
    /// Field separator of delimited raw files
    pub sep: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            cycle_mode: CycleMode::Anode,
            daniel_number: DEFAULT_DANIEL_NUMBER,
            file_id_key: FileIdKey::Size,
            ensure_step_table: false,
            force_step_table_creation: true,
            max_merge_files: 10,
            sorted_data: true,
            sep: ",".to_string(),
        }
    }
}

impl ReaderConfig {
    /// Separator as the byte the CSV reader expects
    pub fn separator(&self) -> Result<u8, ConfigError> {
        match self.sep.as_bytes() {
            [byte] => Ok(*byte),
            _ if self.sep == "\\t" => Ok(b'\t'),
            _ => Err(ConfigError::InvalidSeparator(self.sep.clone())),
        }
    }
}

/// Instrument parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentConfig {
    /// Unit fractions of the raw columns
    pub raw_units: RawUnits,
    /// Classification limits
    pub raw_limits: RawLimits,
}

/// Summary engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Add open circuit voltage columns
    pub find_ocv: bool,
    /// Add internal resistance columns
    pub find_ir: bool,
    /// Add end voltage columns
    pub find_end_voltage: bool,
    /// Select rows from externally supplied statistics
    pub use_stat_rows: bool,
    /// Add a formatted date column
    pub convert_date: bool,
    /// Units of the specific capacities
    pub target_units: TargetUnits,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        let options = SummaryOptions::default();
        Self {
            find_ocv: options.find_ocv,
            find_ir: options.find_ir,
            find_end_voltage: options.find_end_voltage,
            use_stat_rows: options.use_stat_rows,
            convert_date: options.convert_date,
            target_units: options.target_units,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.reader.separator()?;
        Ok(config)
    }

    /// Summary options implied by this configuration
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            cycle_mode: self.reader.cycle_mode,
            daniel_number: self.reader.daniel_number,
            target_units: self.summary.target_units,
            find_ocv: self.summary.find_ocv,
            find_ir: self.summary.find_ir,
            find_end_voltage: self.summary.find_end_voltage,
            use_stat_rows: self.summary.use_stat_rows,
            convert_date: self.summary.convert_date,
            ensure_step_table: self.reader.ensure_step_table,
        }
    }
}
