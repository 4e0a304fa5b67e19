use std::collections::BTreeMap;

use log::{debug, info};

use super::{CellData, CellDataError};
use crate::curves::{self, CurveMethod, CurveOptions, CurveSeries, CycleCurves, OcvCurve};
use crate::dataset::{Dataset, RawTable};
use crate::steps::{ensure_step_table, StepError};
use crate::summary::SummaryTable;

fn cycle_column(raw: &RawTable, column: &[f64], cycle: Option<i32>) -> Vec<f64> {
    match cycle {
        Some(cycle) => raw
            .cycle_index
            .iter()
            .zip(column)
            .filter(|(&c, _)| c == cycle)
            .map(|(_, &v)| v)
            .collect(),
        None => column.to_vec(),
    }
}

/// Values of one (cycle, step) in raw order, `None` when the step is absent
fn step_column(raw: &RawTable, column: &[f64], cycle: i32, step: i32) -> Option<Vec<f64>> {
    match raw.step_row_index().get(&(cycle, step)) {
        Some(rows) => Some(rows.iter().map(|&i| column[i]).collect()),
        None => {
            info!("No data for cycle {} step {}", cycle, step);
            None
        }
    }
}

impl CellData {
    /// Dataset with a step table, made on demand
    fn dataset_with_steps(&mut self, number: Option<usize>) -> Result<Option<&Dataset>, StepError> {
        match self.dataset_mut(number) {
            Some(dataset) => {
                ensure_step_table(dataset)?;
                Ok(Some(dataset))
            }
            None => Ok(None),
        }
    }

    fn curve_options(&self, method: CurveMethod, shift: f64) -> CurveOptions {
        CurveOptions {
            method,
            shift,
            cycle_mode: self.config.reader.cycle_mode,
            target_units: self.config.summary.target_units,
        }
    }

    /// Capacity curves of the given cycles, or of every cycle
    pub fn get_cap(
        &mut self,
        cycles: Option<&[i32]>,
        method: CurveMethod,
        shift: f64,
        number: Option<usize>,
    ) -> Result<Option<Vec<CycleCurves>>, CellDataError> {
        let options = self.curve_options(method, shift);
        match self.dataset_with_steps(number)? {
            Some(dataset) => Ok(Some(curves::get_cap(dataset, cycles, &options)?)),
            None => Ok(None),
        }
    }

    /// Charge capacity curve of one cycle
    pub fn get_ccap(
        &mut self,
        cycle: i32,
        number: Option<usize>,
    ) -> Result<Option<CurveSeries>, CellDataError> {
        let target = self.config.summary.target_units;
        match self.dataset_with_steps(number)? {
            Some(dataset) => {
                let converter = dataset.specific_converter(&target);
                Ok(Some(curves::get_ccap(dataset, cycle, converter)?))
            }
            None => Ok(None),
        }
    }

    /// Discharge capacity curve of one cycle
    pub fn get_dcap(
        &mut self,
        cycle: i32,
        number: Option<usize>,
    ) -> Result<Option<CurveSeries>, CellDataError> {
        let target = self.config.summary.target_units;
        match self.dataset_with_steps(number)? {
            Some(dataset) => {
                let converter = dataset.specific_converter(&target);
                Ok(Some(curves::get_dcap(dataset, cycle, converter)?))
            }
            None => Ok(None),
        }
    }

    /// Relaxation curves, see [`curves::get_ocv`]
    pub fn get_ocv(
        &mut self,
        selector: &str,
        cycle: Option<i32>,
        number: Option<usize>,
    ) -> Result<Option<Vec<OcvCurve>>, CellDataError> {
        match self.dataset_with_steps(number)? {
            Some(dataset) => Ok(Some(curves::get_ocv(dataset, selector, cycle)?)),
            None => Ok(None),
        }
    }

    /// Step numbers of the selected step types per cycle
    pub fn get_step_numbers(
        &mut self,
        selector: &str,
        all_ctypes: bool,
        cycle: Option<i32>,
        number: Option<usize>,
    ) -> Result<Option<BTreeMap<i32, Vec<i32>>>, CellDataError> {
        match self.dataset_with_steps(number)? {
            Some(dataset) => {
                let steps = dataset.steps.as_ref().ok_or(StepError::StepTableNotMade)?;
                Ok(Some(steps.step_numbers(selector, all_ctypes, cycle)?))
            }
            None => Ok(None),
        }
    }

    /// Sorted cycle numbers
    pub fn get_cycle_numbers(&self, number: Option<usize>) -> Option<Vec<i32>> {
        self.dataset(number).map(Dataset::cycle_numbers)
    }

    /// Largest cycle number
    pub fn get_number_of_cycles(&self, number: Option<usize>) -> Option<i32> {
        self.dataset(number).map(Dataset::no_cycles)
    }

    /// Active material mass (mg)
    pub fn get_mass(&self, number: Option<usize>) -> Option<f64> {
        self.dataset(number).map(|d| d.info.mass)
    }

    /// Set the active material mass (mg)
    pub fn set_mass(&mut self, mass: f64, number: Option<usize>) {
        if let Some(dataset) = self.dataset_mut(number) {
            debug!("Setting mass of '{}' to {}", dataset.info.name, mass);
            dataset.info.set_mass(mass);
        }
    }

    /// The summary, when made
    pub fn get_summary(&self, number: Option<usize>) -> Option<&SummaryTable> {
        let dataset = self.dataset(number)?;
        if dataset.summary.is_none() {
            info!("Summary of '{}' not made", dataset.info.name);
        }
        dataset.summary.as_ref()
    }

    /// Voltage of one cycle, or of the whole test
    pub fn get_voltage(&self, cycle: Option<i32>, number: Option<usize>) -> Option<Vec<f64>> {
        let raw = self.dataset(number)?.raw.as_ref()?;
        Some(cycle_column(raw, &raw.voltage, cycle))
    }

    /// Current of one cycle, or of the whole test
    pub fn get_current(&self, cycle: Option<i32>, number: Option<usize>) -> Option<Vec<f64>> {
        let raw = self.dataset(number)?.raw.as_ref()?;
        Some(cycle_column(raw, &raw.current, cycle))
    }

    /// Test time of one cycle, or of the whole test, in seconds or minutes
    pub fn get_timestamp(
        &self,
        cycle: Option<i32>,
        in_minutes: bool,
        number: Option<usize>,
    ) -> Option<Vec<f64>> {
        let raw = self.dataset(number)?.raw.as_ref()?;
        let mut times = cycle_column(raw, &raw.test_time, cycle);
        if in_minutes {
            times.iter_mut().for_each(|t| *t /= 60.0);
        }
        Some(times)
    }

    /// Voltage of one step of one cycle
    pub fn sget_voltage(&self, cycle: i32, step: i32, number: Option<usize>) -> Option<Vec<f64>> {
        let raw = self.dataset(number)?.raw.as_ref()?;
        step_column(raw, &raw.voltage, cycle, step)
    }

    /// Step time (s) of one step of one cycle
    pub fn sget_steptime(&self, cycle: i32, step: i32, number: Option<usize>) -> Option<Vec<f64>> {
        let raw = self.dataset(number)?.raw.as_ref()?;
        step_column(raw, &raw.step_time, cycle, step)
    }

    /// Test time (s) of one step of one cycle
    pub fn sget_timestamp(&self, cycle: i32, step: i32, number: Option<usize>) -> Option<Vec<f64>> {
        let raw = self.dataset(number)?.raw.as_ref()?;
        step_column(raw, &raw.test_time, cycle, step)
    }

    /// Set the total electrode mass (mg)
    pub fn set_tot_mass(&mut self, mass: f64, number: Option<usize>) {
        if let Some(dataset) = self.dataset_mut(number) {
            debug!("Setting total mass of '{}' to {}", dataset.info.name, mass);
            dataset.info.tot_mass = mass;
        }
    }

    /// Set the nominal capacity
    pub fn set_nom_cap(&mut self, nom_cap: f64, number: Option<usize>) {
        if let Some(dataset) = self.dataset_mut(number) {
            debug!("Setting nominal capacity of '{}' to {}", dataset.info.name, nom_cap);
            dataset.info.nom_cap = nom_cap;
        }
    }
}
