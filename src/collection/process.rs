use std::path::Path;

use log::{info, warn};

use super::{CellData, CellDataError};
use crate::steps::{self, StepSpecification};
use crate::summary;

impl CellData {
    /// Load step type definitions and remake the step table with them.
    ///
    /// With `short` the file has no cycle column and applies to every cycle.
    /// The definitions are kept for later [`CellData::make_step_table`]
    /// calls. Without loaded data only the definitions are stored.
    pub fn load_step_specifications<P: AsRef<Path>>(
        &mut self,
        path: P,
        short: bool,
    ) -> Result<(), CellDataError> {
        let specification = StepSpecification::from_path(path.as_ref(), short)?;
        info!(
            "Loaded {} step specifications from {}",
            specification.entries().len(),
            path.as_ref().display()
        );
        self.step_specification = Some(specification);
        if self.dataset(None).is_some() {
            self.make_step_table(None)?;
        }
        Ok(())
    }

    /// Forget loaded step type definitions
    pub fn clear_step_specifications(&mut self) {
        self.step_specification = None;
    }

    /// Make the step table of one dataset, returning its number of steps
    pub fn make_step_table(&mut self, number: Option<usize>) -> Result<Option<usize>, CellDataError> {
        let specification = self.step_specification.clone();
        let dataset = match self.dataset_mut(number) {
            Some(dataset) => dataset,
            None => return Ok(None),
        };
        steps::make_step_table(dataset, specification.as_ref())?;
        Ok(dataset.steps.as_ref().map(|s| s.len()))
    }

    /// Check the step table of one dataset against its raw table
    pub fn validate_step_table(
        &self,
        full: bool,
        number: Option<usize>,
    ) -> Result<Option<bool>, CellDataError> {
        match self.dataset(number) {
            Some(dataset) => Ok(Some(steps::validate_step_table(dataset, full)?)),
            None => Ok(None),
        }
    }

    /// Make the summary of the first dataset, or of every dataset with `all`.
    ///
    /// Returns the number of summaries made. With `all` a failing dataset
    /// is logged and skipped.
    pub fn make_summary(&mut self, all: bool) -> Result<usize, CellDataError> {
        if !all {
            return Ok(self.make_summary_of(None)?.map_or(0, |_| 1));
        }
        let options = self.config.summary_options();
        let mut made = 0;
        for (number, dataset) in self.datasets.iter_mut().enumerate() {
            if dataset.is_empty() {
                info!("Dataset {} is empty, no summary", number);
                continue;
            }
            match summary::make_summary(dataset, &options) {
                Ok(()) => made += 1,
                Err(e) => warn!("Could not make summary of dataset {}: {}", number, e),
            }
        }
        Ok(made)
    }

    /// Make the summary of one dataset, returning its number of rows
    pub fn make_summary_of(&mut self, number: Option<usize>) -> Result<Option<usize>, CellDataError> {
        let options = self.config.summary_options();
        let dataset = match self.dataset_mut(number) {
            Some(dataset) => dataset,
            None => return Ok(None),
        };
        summary::make_summary(dataset, &options)?;
        Ok(dataset.summary.as_ref().map(|s| s.len()))
    }
}
