//! # cellpeak Collection Module
//!
//! [`CellData`] is the entry point for working with cells: it owns the
//! loaded datasets together with the pipeline configuration and runs every
//! stage on them.
//!
//! ```rust,no_run
//! use cellpeak::collection::{CellData, LoadCellOptions};
//!
//! let mut cell = CellData::default();
//! cell.loadcell(
//!     &["cell_01.csv", "cell_02.csv"],
//!     Some("cell.cellpeak".as_ref()),
//!     Some(0.86),
//!     &LoadCellOptions { summary_on_raw: true, ..Default::default() },
//! )?;
//! cell.save("cell.cellpeak", false, true)?;
//! # Ok::<(), cellpeak::collection::CellDataError>(())
//! ```
//!
//! Operations address one dataset by number, `None` meaning the first.
//! Addressing an empty or missing dataset is logged and yields `Ok(None)`.
//! Operations over every dataset log failures per dataset and continue.

mod error;
mod io;
mod process;
mod query;


use log::info;

pub use error::CellDataError;
pub use io::LoadCellOptions;

use crate::config::PipelineConfig;
use crate::dataset::Dataset;
use crate::loader::{CsvLoader, Loader};
use crate::steps::StepSpecification;

/// Datasets of one cell and the configuration to process them with
pub struct CellData {
    datasets: Vec<Dataset>,
    config: PipelineConfig,
    loader: Box<dyn Loader>,
    step_specification: Option<StepSpecification>,
}

impl Default for CellData {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl std::fmt::Debug for CellData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellData")
            .field("datasets", &self.datasets.len())
            .field("loader", &self.loader.name())
            .field("config", &self.config)
            .finish()
    }
}

impl CellData {
    /// Collection using the CSV loader set up from `config`
    pub fn new(config: PipelineConfig) -> Self {
        let loader = CsvLoader::new()
            .with_delimiter(config.reader.separator().unwrap_or(b','))
            .with_units(config.instrument.raw_units)
            .with_limits(config.instrument.raw_limits);
        Self {
            datasets: Vec::new(),
            config,
            loader: Box::new(loader),
            step_specification: None,
        }
    }

    /// Use another raw file loader
    pub fn with_loader(mut self, loader: Box<dyn Loader>) -> Self {
        self.loader = loader;
        self
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Loaded datasets
    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Add a dataset
    pub fn push(&mut self, dataset: Dataset) {
        self.datasets.push(dataset);
    }

    /// Number of datasets
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether no dataset is loaded
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// True when at least one dataset is loaded and none is empty
    pub fn check(&self) -> bool {
        !self.datasets.is_empty() && self.datasets.iter().all(|d| !d.is_empty())
    }

    /// Dataset `number` (first when `None`) unless missing or empty
    pub fn dataset(&self, number: Option<usize>) -> Option<&Dataset> {
        let number = number.unwrap_or(0);
        match self.datasets.get(number) {
            Some(dataset) if !dataset.is_empty() => Some(dataset),
            _ => {
                info!("Dataset {} is empty", number);
                None
            }
        }
    }

    /// Mutable dataset `number` (first when `None`) unless missing or empty
    pub fn dataset_mut(&mut self, number: Option<usize>) -> Option<&mut Dataset> {
        let number = number.unwrap_or(0);
        match self.datasets.get_mut(number) {
            Some(dataset) if !dataset.is_empty() => Some(dataset),
            _ => {
                info!("Dataset {} is empty", number);
                None
            }
        }
    }
}
