use log::{debug, info, warn};

use super::augment;
use super::{SummaryError, SummaryOptions, SummaryTable};
use crate::dataset::{Dataset, RawTable};
use crate::metadata::{xldate_to_datetime, CycleMode};
use crate::schema::summary_columns as col;
use crate::steps::ensure_step_table;

/// Running sum that leaves missing values missing without stopping the sum
pub fn cumsum_skipna(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                f64::NAN
            } else {
                total += v;
                total
            }
        })
        .collect()
}

/// `values[n-1]`, NaN for the first row
fn shifted(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if !values.is_empty() {
        out.push(f64::NAN);
        out.extend_from_slice(&values[..values.len() - 1]);
    }
    out
}

fn sum_skipna<I: Iterator<Item = f64>>(values: I) -> f64 {
    values.filter(|v| !v.is_nan()).sum()
}

/// Rows the summary is built from, one per cycle
fn select_rows(dataset: &Dataset, raw: &RawTable, use_stat_rows: bool) -> Vec<usize> {
    if use_stat_rows {
        match &dataset.stat_data_points {
            Some(points) => {
                let rows: Vec<usize> = (0..raw.len())
                    .filter(|&i| points.contains(&raw.data_point[i]))
                    .collect();
                if !rows.is_empty() {
                    return rows;
                }
                info!("Statistics rows do not match the raw data, selecting last rows");
            }
            None => info!("No statistics rows available, selecting last rows"),
        }
    }

    let last = raw.last_row_per_cycle();
    let max_cycle = raw.max_cycle().unwrap_or(0);
    let mut rows = Vec::with_capacity(last.len());
    for cycle in 1..=max_cycle {
        match last.get(&cycle) {
            Some(&row) => rows.push(row),
            None => warn!("Cycle {} is missing", cycle),
        }
    }
    rows
}

/// Summary skeleton: identification columns and raw capacities
pub fn base_summary(
    raw: &RawTable,
    rows: &[usize],
    convert_date: bool,
) -> Result<SummaryTable, SummaryError> {
    let cycle_index: Vec<i32> = rows.iter().map(|&i| raw.cycle_index[i]).collect();
    let data_point = rows.iter().map(|&i| raw.data_point[i]).collect();
    let test_time = rows.iter().map(|&i| raw.test_time[i]).collect();
    let mut summary = SummaryTable::new(cycle_index, data_point, test_time);

    if convert_date {
        if let Some(date_time) = &raw.date_time {
            summary.date_time_txt = Some(
                rows.iter()
                    .map(|&i| {
                        xldate_to_datetime(date_time[i])
                            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                            .unwrap_or_default()
                    })
                    .collect(),
            );
        }
    }

    summary.insert(
        col::RAW_CHARGE_CAPACITY,
        rows.iter().map(|&i| raw.charge_capacity[i]).collect(),
    )?;
    summary.insert(
        col::RAW_DISCHARGE_CAPACITY,
        rows.iter().map(|&i| raw.discharge_capacity[i]).collect(),
    )?;
    Ok(summary)
}

/// Add the derived capacity metrics to a summary holding raw capacities.
///
/// `converter` turns raw capacities into specific capacities.
pub fn add_derived_columns(
    summary: &mut SummaryTable,
    converter: f64,
    options: &SummaryOptions,
) -> Result<(), SummaryError> {
    let charge: Vec<f64> = raw_column(summary, col::RAW_CHARGE_CAPACITY)?
        .iter()
        .map(|v| v * converter)
        .collect();
    let discharge: Vec<f64> = raw_column(summary, col::RAW_DISCHARGE_CAPACITY)?
        .iter()
        .map(|v| v * converter)
        .collect();

    summary.insert(col::DISCHARGE_CAPACITY, discharge.clone())?;
    summary.insert(col::CHARGE_CAPACITY, charge.clone())?;
    summary.insert(col::CUMULATED_DISCHARGE_CAPACITY, cumsum_skipna(&discharge))?;
    summary.insert(col::CUMULATED_CHARGE_CAPACITY, cumsum_skipna(&charge))?;

    let (first, second) = match options.cycle_mode {
        CycleMode::Anode => (&discharge, &charge),
        CycleMode::Cathode => (&charge, &discharge),
    };
    debug!(
        "Coulombic efficiency as 100 x {} / {}",
        if options.cycle_mode == CycleMode::Anode { "charge" } else { "discharge" },
        if options.cycle_mode == CycleMode::Anode { "discharge" } else { "charge" },
    );

    let efficiency: Vec<f64> = first
        .iter()
        .zip(second)
        .map(|(f, s)| 100.0 * s / f)
        .collect();
    let difference: Vec<f64> = first.iter().zip(second).map(|(f, s)| s - f).collect();
    summary.insert(col::CUMULATED_COULOMBIC_EFFICIENCY, cumsum_skipna(&efficiency))?;
    summary.insert(col::CUMULATED_COULOMBIC_DIFFERENCE, cumsum_skipna(&difference))?;
    summary.insert(col::COULOMBIC_EFFICIENCY, efficiency)?;
    summary.insert(col::COULOMBIC_DIFFERENCE, difference)?;

    let discharge_loss: Vec<f64> = shifted(&discharge)
        .iter()
        .zip(&discharge)
        .map(|(prev, cur)| prev - cur)
        .collect();
    let charge_loss: Vec<f64> = shifted(&charge)
        .iter()
        .zip(&charge)
        .map(|(prev, cur)| prev - cur)
        .collect();
    summary.insert(
        col::CUMULATED_DISCHARGE_CAPACITY_LOSS,
        cumsum_skipna(&discharge_loss),
    )?;
    summary.insert(col::CUMULATED_CHARGE_CAPACITY_LOSS, cumsum_skipna(&charge_loss))?;
    summary.insert(col::DISCHARGE_CAPACITY_LOSS, discharge_loss)?;
    summary.insert(col::CHARGE_CAPACITY_LOSS, charge_loss)?;

    let (low, high) =
        irreversible_levels(&summary.cycle_index, first, second, options.daniel_number);
    summary.insert(col::LOW_LEVEL, low)?;
    summary.insert(col::HIGH_LEVEL, high)?;

    // no zero guard: a zero capacity yields inf or NaN
    let first_prev = shifted(first);
    let second_prev = shifted(second);
    let n = first.len();
    let ric: Vec<f64> = (0..n)
        .map(|i| (first_prev[i] - second[i]) / second_prev[i])
        .collect();
    let ric_sei: Vec<f64> = (0..n)
        .map(|i| (first[i] - second_prev[i]) / second_prev[i])
        .collect();
    let ric_disconnect: Vec<f64> = (0..n)
        .map(|i| (second_prev[i] - second[i]) / second_prev[i])
        .collect();
    summary.insert(col::CUMULATED_RIC, cumsum_skipna(&ric))?;
    summary.insert(col::CUMULATED_RIC_SEI, cumsum_skipna(&ric_sei))?;
    summary.insert(col::CUMULATED_RIC_DISCONNECT, cumsum_skipna(&ric_disconnect))?;

    let edge_movement: Vec<f64> = first.iter().zip(second).map(|(f, s)| f - s).collect();
    let shifted_charge = cumsum_skipna(&edge_movement);
    let shifted_discharge: Vec<f64> = shifted_charge
        .iter()
        .zip(first)
        .map(|(s, f)| s + f)
        .collect();
    summary.insert(col::SHIFTED_CHARGE_CAPACITY, shifted_charge)?;
    summary.insert(col::SHIFTED_DISCHARGE_CAPACITY, shifted_discharge)?;
    Ok(())
}

fn raw_column<'a>(summary: &'a SummaryTable, name: &str) -> Result<&'a [f64], SummaryError> {
    summary.get(name).ok_or_else(|| SummaryError::LengthMismatch {
        column: name.to_string(),
        expected: summary.len(),
        actual: 0,
    })
}

/// `low_level` and `high_level` relative to the reference cycle.
///
/// Both are NaN when the reference cycle does not exist.
pub fn irreversible_levels(
    cycles: &[i32],
    first: &[f64],
    second: &[f64],
    daniel_number: i32,
) -> (Vec<f64>, Vec<f64>) {
    let n = cycles.len();
    let reference_row = match cycles.iter().position(|&c| c == daniel_number) {
        Some(row) => row,
        None => {
            info!(
                "Could not extract low-high levels, reference cycle {} does not exist",
                daniel_number
            );
            return (vec![f64::NAN; n], vec![f64::NAN; n]);
        }
    };

    let before = |values: &[f64]| {
        sum_skipna(
            cycles
                .iter()
                .zip(values)
                .filter(|(&c, _)| c < daniel_number)
                .map(|(_, &v)| v),
        )
    };
    let reference = before(second) + before(first) + first[reference_row];

    let cum_first = cumsum_skipna(first);
    let cum_second = cumsum_skipna(second);
    let low = (0..n)
        .map(|i| 100.0 / reference * (cum_first[i] - cum_second[i]))
        .collect();
    let high = (0..n)
        .map(|i| 100.0 / reference * (first[i] + cum_first[i] - cum_second[i]))
        .collect();
    (low, high)
}

/// Make the summary of a dataset in place.
///
/// Fails with [`SummaryError::EmptyDataset`] without touching the dataset
/// when it has no raw data.
pub fn make_summary(dataset: &mut Dataset, options: &SummaryOptions) -> Result<(), SummaryError> {
    if dataset.is_empty() {
        return Err(SummaryError::EmptyDataset);
    }
    let mass = dataset.info.mass;
    if !(mass.is_finite() && mass > 0.0) {
        return Err(SummaryError::InvalidMass(mass));
    }
    if !dataset.info.mass_given {
        debug!(
            "Mass for '{}' is not given, using {} mg",
            dataset.info.name, mass
        );
    }

    if options.needs_step_table() {
        ensure_step_table(dataset)?;
    }

    let converter = dataset.specific_converter(&options.target_units);
    let raw = dataset.raw().map_err(|_| SummaryError::EmptyDataset)?;
    let rows = select_rows(dataset, raw, options.use_stat_rows);
    let mut summary = base_summary(raw, &rows, options.convert_date)?;

    if let Some(steps) = &dataset.steps {
        if options.find_ocv {
            augment::add_ocv(&mut summary, steps, options.cycle_mode)?;
        }
        if options.find_end_voltage {
            augment::add_end_voltage(&mut summary, raw, steps)?;
        }
        if options.find_ir {
            augment::add_internal_resistance(&mut summary, raw, steps)?;
        }
    }
    add_derived_columns(&mut summary, converter, options)?;

    info!(
        "Made summary for '{}' with {} cycles",
        dataset.info.name,
        summary.len()
    );
    dataset.summary = Some(summary);
    Ok(())
}
