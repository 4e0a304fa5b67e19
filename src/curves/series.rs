use super::CurveError;
use crate::dataset::{Dataset, RawTable};
use crate::steps::{resolve_step_types, StepError, StepRecord, StepTable, StepType};

/// Capacity and voltage of one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSeries {
    /// Specific capacity
    pub capacity: Vec<f64>,
    /// Voltage
    pub voltage: Vec<f64>,
}

impl CurveSeries {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.capacity.len()
    }

    /// Whether the series has no samples
    pub fn is_empty(&self) -> bool {
        self.capacity.is_empty()
    }

    /// Largest capacity, ignoring NaN
    pub fn max_capacity(&self) -> f64 {
        self.capacity
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Smallest capacity, ignoring NaN
    pub fn min_capacity(&self) -> f64 {
        self.capacity
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(f64::INFINITY, f64::min)
    }

    /// Add a constant to every capacity
    pub fn translate(&mut self, offset: f64) {
        self.capacity.iter_mut().for_each(|c| *c += offset);
    }

    /// Reflect around `pivot`: `pivot - capacity`
    pub fn reflect(&mut self, pivot: f64) {
        self.capacity.iter_mut().for_each(|c| *c = pivot - *c);
    }
}

/// Voltage against step time of one relaxation step
#[derive(Debug, Clone, PartialEq)]
pub struct OcvCurve {
    /// Cycle number
    pub cycle: i32,
    /// Step number
    pub step: i32,
    /// Relaxation direction
    pub step_type: StepType,
    /// Step time of every sample
    pub step_time: Vec<f64>,
    /// Voltage of every sample
    pub voltage: Vec<f64>,
}

pub(crate) fn step_table(dataset: &Dataset) -> Result<(&RawTable, &StepTable), CurveError> {
    let raw = dataset.raw().map_err(|_| CurveError::EmptyDataset)?;
    let steps = dataset
        .steps
        .as_ref()
        .ok_or(StepError::StepTableNotMade)?;
    Ok((raw, steps))
}

fn step_rows(raw: &RawTable, cycle: i32, step: i32) -> Vec<usize> {
    (0..raw.len())
        .filter(|&i| raw.cycle_index[i] == cycle && raw.step_index[i] == step)
        .collect()
}

fn capacity_of(
    dataset: &Dataset,
    cycle: i32,
    selector: &str,
    converter: f64,
) -> Result<CurveSeries, CurveError> {
    let (raw, steps) = step_table(dataset)?;
    let step = steps
        .step_numbers(selector, false, Some(cycle))?
        .get(&cycle)
        .and_then(|list| list.first().copied())
        .unwrap_or(0);

    let rows = if step == 0 {
        Vec::new()
    } else {
        step_rows(raw, cycle, step)
    };
    if rows.is_empty() {
        return Err(CurveError::NoDataForStep {
            cycle,
            step_type: selector.to_string(),
        });
    }

    let column = if selector == "charge" {
        &raw.charge_capacity
    } else {
        &raw.discharge_capacity
    };
    Ok(CurveSeries {
        capacity: rows.iter().map(|&i| column[i] * converter).collect(),
        voltage: rows.iter().map(|&i| raw.voltage[i]).collect(),
    })
}

/// Charge capacity and voltage of the first charge step of a cycle
pub fn get_ccap(dataset: &Dataset, cycle: i32, converter: f64) -> Result<CurveSeries, CurveError> {
    capacity_of(dataset, cycle, "charge", converter)
}

/// Discharge capacity and voltage of the first discharge step of a cycle
pub fn get_dcap(dataset: &Dataset, cycle: i32, converter: f64) -> Result<CurveSeries, CurveError> {
    capacity_of(dataset, cycle, "discharge", converter)
}

/// Relaxation curves.
///
/// `selector` is `ocv` for both directions, `ocvrlx_up` or `ocvrlx_down`.
/// With a cycle only the last matching step of that cycle is returned,
/// otherwise every matching step of every cycle.
pub fn get_ocv(
    dataset: &Dataset,
    selector: &str,
    cycle: Option<i32>,
) -> Result<Vec<OcvCurve>, CurveError> {
    let (raw, steps) = step_table(dataset)?;
    let types = resolve_step_types(selector, false)?;

    let mut curves = Vec::new();
    for step_type in types {
        let records: Vec<_> = steps
            .records
            .iter()
            .filter(|r| r.step_type == Some(step_type))
            .filter(|r| cycle.map_or(true, |c| r.cycle == c))
            .collect();
        let records: Vec<&StepRecord> = match cycle {
            Some(_) => records.last().copied().into_iter().collect(),
            None => records,
        };
        for record in records {
            let rows = step_rows(raw, record.cycle, record.step);
            if rows.is_empty() {
                continue;
            }
            curves.push(OcvCurve {
                cycle: record.cycle,
                step: record.step,
                step_type,
                step_time: rows.iter().map(|&i| raw.step_time[i]).collect(),
                voltage: rows.iter().map(|&i| raw.voltage[i]).collect(),
            });
        }
    }
    Ok(curves)
}
