use std::collections::BTreeMap;

use log::{debug, info};

use super::rules::{classify, default_rules, StepConditions};
use super::{ColumnStats, StepError, StepSpecification, StepType};
use crate::dataset::{Dataset, RawTable};
use crate::metadata::RawLimits;

/// Aggregated description of one (cycle, step) interval
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    /// Cycle number
    pub cycle: i32,
    /// Step number
    pub step: i32,
    /// Sub-step number, always 1 in tables built from raw data
    pub sub_step: i32,
    /// Assigned type, `None` when a specification left it unset
    pub step_type: Option<StepType>,
    /// Free-text information from a specification
    pub info: Option<String>,
    /// Data point aggregates
    pub point: ColumnStats,
    /// Step time aggregates
    pub step_time: ColumnStats,
    /// Current aggregates
    pub current: ColumnStats,
    /// Voltage aggregates
    pub voltage: ColumnStats,
    /// Charge capacity aggregates
    pub charge: ColumnStats,
    /// Discharge capacity aggregates
    pub discharge: ColumnStats,
    /// Internal resistance aggregates, when the raw table has them
    pub ir: Option<ColumnStats>,
}

impl StepRecord {
    /// Label as persisted, `""` when unset
    pub fn type_label(&self) -> &'static str {
        self.step_type.map(|t| t.as_str()).unwrap_or("")
    }
}

/// Step classification of one test, ordered by (cycle, step, sub_step)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepTable {
    /// One record per interval
    pub records: Vec<StepRecord>,
}

impl StepTable {
    /// Number of intervals
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no intervals
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether internal resistance aggregates are present
    pub fn has_ir(&self) -> bool {
        self.records.first().map_or(false, |r| r.ir.is_some())
    }

    /// Sorted distinct cycle numbers
    pub fn cycles(&self) -> Vec<i32> {
        let mut cycles: Vec<i32> = self.records.iter().map(|r| r.cycle).collect();
        cycles.dedup();
        cycles.sort_unstable();
        cycles.dedup();
        cycles
    }

    /// Records of one cycle with one of the given types, in table order
    pub fn records_of(&self, cycle: i32, types: &[StepType]) -> Vec<&StepRecord> {
        self.records
            .iter()
            .filter(|r| r.cycle == cycle)
            .filter(|r| r.step_type.map_or(false, |t| types.contains(&t)))
            .collect()
    }

    /// Shift every cycle number
    pub fn offset_cycles(&mut self, offset: i32) {
        for record in &mut self.records {
            record.cycle += offset;
        }
    }

    /// Append the records of another table
    pub fn append(&mut self, other: StepTable) {
        self.records.extend(other.records);
    }
}

/// Aggregate and classify the steps of a raw table.
///
/// Rows are grouped by (cycle, step). Sub-steps are folded into their step
/// and every record gets sub-step 1.
///
/// With a specification the heuristic rules are not applied; intervals the
/// specification does not cover keep an unset type.
pub fn build_step_table(
    raw: &RawTable,
    limits: &RawLimits,
    specification: Option<&StepSpecification>,
) -> StepTable {
    let mut groups: BTreeMap<(i32, i32), Vec<usize>> = BTreeMap::new();
    for i in 0..raw.len() {
        groups
            .entry((raw.cycle_index[i], raw.step_index[i]))
            .or_default()
            .push(i);
    }

    let points: Vec<f64> = raw.data_point.iter().map(|&p| p as f64).collect();
    let rules = default_rules();

    let records = groups
        .into_iter()
        .map(|((cycle, step), rows)| {
            let mut record = StepRecord {
                cycle,
                step,
                sub_step: 1,
                step_type: None,
                info: None,
                point: ColumnStats::from_rows(&points, &rows),
                step_time: ColumnStats::from_rows(&raw.step_time, &rows),
                current: ColumnStats::from_rows(&raw.current, &rows),
                voltage: ColumnStats::from_rows(&raw.voltage, &rows),
                charge: ColumnStats::from_rows(&raw.charge_capacity, &rows),
                discharge: ColumnStats::from_rows(&raw.discharge_capacity, &rows),
                ir: raw
                    .internal_resistance
                    .as_ref()
                    .map(|ir| ColumnStats::from_rows(ir, &rows)),
            };

            match specification {
                Some(spec) => {
                    if let Some(entry) = spec.lookup(cycle, step) {
                        record.step_type = Some(entry.step_type);
                        record.info = entry.info.clone();
                    }
                }
                None => {
                    let conditions = StepConditions::evaluate(&record, limits);
                    record.step_type = Some(classify(&conditions, &rules));
                }
            }
            record
        })
        .collect();

    StepTable { records }
}

/// Make the step table of a dataset in place.
///
/// Fails with [`StepError::EmptyDataset`] without touching the dataset when
/// it has no raw data.
pub fn make_step_table(
    dataset: &mut Dataset,
    specification: Option<&StepSpecification>,
) -> Result<(), StepError> {
    let raw = dataset.raw().map_err(|_| StepError::EmptyDataset)?;
    let table = build_step_table(raw, &dataset.raw_limits, specification);
    info!(
        "Made step table for '{}' with {} steps",
        dataset.info.name,
        table.len()
    );
    let unknown = table
        .records
        .iter()
        .filter(|r| r.step_type == Some(StepType::NotKnown))
        .count();
    if unknown > 0 {
        debug!("{} steps could not be classified", unknown);
    }
    dataset.steps = Some(table);
    Ok(())
}

/// Make the step table unless it already exists
pub fn ensure_step_table(dataset: &mut Dataset) -> Result<(), StepError> {
    if dataset.step_table_made() {
        return Ok(());
    }
    debug!("Step table missing for '{}', making it", dataset.info.name);
    make_step_table(dataset, None)
}

/// Check a step table against the raw table it should describe.
///
/// The quick check compares the number of cycles; the full check also
/// compares the number of distinct steps in every cycle.
pub fn validate_step_table(dataset: &Dataset, full: bool) -> Result<bool, StepError> {
    let raw = dataset.raw().map_err(|_| StepError::EmptyDataset)?;
    let steps = dataset.steps.as_ref().ok_or(StepError::StepTableNotMade)?;

    let raw_cycles = raw.cycles();
    if raw_cycles != steps.cycles() {
        debug!(
            "Step table has {} cycles, raw table {}",
            steps.cycles().len(),
            raw_cycles.len()
        );
        return Ok(false);
    }
    if !full {
        return Ok(true);
    }

    let mut raw_steps: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
    for i in 0..raw.len() {
        raw_steps
            .entry(raw.cycle_index[i])
            .or_default()
            .push(raw.step_index[i]);
    }
    for (cycle, mut keys) in raw_steps {
        keys.sort_unstable();
        keys.dedup();
        let in_table = steps.records.iter().filter(|r| r.cycle == cycle).count();
        if in_table != keys.len() {
            debug!(
                "Cycle {}: step table has {} steps, raw table {}",
                cycle,
                in_table,
                keys.len()
            );
            return Ok(false);
        }
    }
    Ok(true)
}
