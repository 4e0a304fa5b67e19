//! Optional summary columns looked up through the step table.
//!
//! Every lookup that finds nothing yields 0.0 and a log entry.

use std::collections::BTreeMap;

use log::{debug, info};

use super::{SummaryError, SummaryTable};
use crate::dataset::RawTable;
use crate::metadata::CycleMode;
use crate::schema::summary_columns as col;
use crate::steps::{StepTable, StepType};

type RowIndex = BTreeMap<(i32, i32), Vec<usize>>;

enum Pick {
    First,
    Last,
}

/// Step number of the first or last step of a kind in a cycle, `0` when none
fn pick_step(
    steps: &StepTable,
    selector: &str,
    cycle: i32,
    pick: Pick,
) -> Result<i32, SummaryError> {
    let numbers = steps.step_numbers(selector, false, Some(cycle))?;
    let found = numbers.get(&cycle).and_then(|list| match pick {
        Pick::First => list.first().copied(),
        Pick::Last => list.last().copied(),
    });
    Ok(found.unwrap_or(0))
}

fn value_of_step(
    column: &[f64],
    index: &RowIndex,
    cycle: i32,
    step: i32,
    pick: Pick,
) -> Option<f64> {
    if step == 0 {
        return None;
    }
    let rows = index.get(&(cycle, step))?;
    let row = match pick {
        Pick::First => rows.first(),
        Pick::Last => rows.last(),
    }?;
    Some(column[*row])
}

/// Last voltage of the last charge and discharge step of every cycle
pub fn add_end_voltage(
    summary: &mut SummaryTable,
    raw: &RawTable,
    steps: &StepTable,
) -> Result<(), SummaryError> {
    let index = raw.step_row_index();
    let mut end_charge = Vec::with_capacity(summary.len());
    let mut end_discharge = Vec::with_capacity(summary.len());

    for &cycle in &summary.cycle_index {
        for (selector, out) in [("charge", &mut end_charge), ("discharge", &mut end_discharge)] {
            let step = pick_step(steps, selector, cycle, Pick::Last)?;
            let value = value_of_step(&raw.voltage, &index, cycle, step, Pick::Last)
                .unwrap_or_else(|| {
                    debug!("No {} step in cycle {}, end voltage set to 0", selector, cycle);
                    0.0
                });
            out.push(value);
        }
    }

    summary.insert(col::END_VOLTAGE_DISCHARGE, end_discharge)?;
    summary.insert(col::END_VOLTAGE_CHARGE, end_charge)?;
    Ok(())
}

/// First internal resistance value of the first charge and discharge step
pub fn add_internal_resistance(
    summary: &mut SummaryTable,
    raw: &RawTable,
    steps: &StepTable,
) -> Result<(), SummaryError> {
    let n = summary.len();
    let ir = match &raw.internal_resistance {
        Some(ir) => ir,
        None => {
            info!("Raw data has no internal resistance, IR columns set to 0");
            summary.insert(col::IR_DISCHARGE, vec![0.0; n])?;
            summary.insert(col::IR_CHARGE, vec![0.0; n])?;
            return Ok(());
        }
    };

    let index = raw.step_row_index();
    let mut ir_charge = Vec::with_capacity(n);
    let mut ir_discharge = Vec::with_capacity(n);

    for &cycle in &summary.cycle_index {
        for (selector, out) in [("charge", &mut ir_charge), ("discharge", &mut ir_discharge)] {
            let step = pick_step(steps, selector, cycle, Pick::First)?;
            let value = value_of_step(ir, &index, cycle, step, Pick::First).unwrap_or_else(|| {
                debug!("No {} step in cycle {}, IR set to 0", selector, cycle);
                0.0
            });
            out.push(value);
        }
    }

    summary.insert(col::IR_DISCHARGE, ir_discharge)?;
    summary.insert(col::IR_CHARGE, ir_charge)?;
    Ok(())
}

fn voltage_range(steps: &StepTable, cycle: i32, step_type: StepType) -> Option<(f64, f64)> {
    steps
        .records_of(cycle, &[step_type])
        .iter()
        .map(|r| (r.voltage.min, r.voltage.max))
        .filter(|(min, max)| !min.is_nan() && !max.is_nan())
        .reduce(|(a_min, a_max), (b_min, b_max)| (a_min.min(b_min), a_max.max(b_max)))
}

/// Voltage range of the relaxation steps of every cycle.
///
/// Anode mode reports the rising relaxation as the first one.
pub fn add_ocv(
    summary: &mut SummaryTable,
    steps: &StepTable,
    cycle_mode: CycleMode,
) -> Result<(), SummaryError> {
    let (first_type, second_type) = match cycle_mode {
        CycleMode::Anode => (StepType::OcvrlxUp, StepType::OcvrlxDown),
        CycleMode::Cathode => (StepType::OcvrlxDown, StepType::OcvrlxUp),
    };

    let n = summary.len();
    let mut columns = [
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
    ];
    for &cycle in &summary.cycle_index {
        for (k, step_type) in [first_type, second_type].into_iter().enumerate() {
            let (min, max) = voltage_range(steps, cycle, step_type).unwrap_or_else(|| {
                debug!("No {} step in cycle {}, OCV set to 0", step_type, cycle);
                (0.0, 0.0)
            });
            columns[2 * k].push(min);
            columns[2 * k + 1].push(max);
        }
    }

    let [first_min, first_max, second_min, second_max] = columns;
    summary.insert(col::OCV_FIRST_MIN, first_min)?;
    summary.insert(col::OCV_FIRST_MAX, first_max)?;
    summary.insert(col::OCV_SECOND_MIN, second_min)?;
    summary.insert(col::OCV_SECOND_MAX, second_max)?;
    Ok(())
}
