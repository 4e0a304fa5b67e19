use super::*;
use crate::dataset::Dataset;
use crate::metadata::{CycleMode, DatasetInfo};
use crate::schema::summary_columns as col;
use crate::synthetic::SyntheticCell;

fn synthetic(cycles: usize) -> (SyntheticCell, Dataset) {
    let cell = SyntheticCell {
        cycles,
        ..Default::default()
    };
    let dataset = cell.build_dataset("synthetic");
    (cell, dataset)
}

fn column<'a>(dataset: &'a Dataset, name: &str) -> &'a [f64] {
    dataset
        .summary
        .as_ref()
        .and_then(|s| s.get(name))
        .unwrap_or_else(|| panic!("missing column {name}"))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6 * expected.abs().max(1.0),
        "{actual} != {expected}"
    );
}

#[test]
fn test_cumsum_skipna() {
    let out = cumsum_skipna(&[1.0, f64::NAN, 2.0, 3.0]);
    assert_eq!(out[0], 1.0);
    assert!(out[1].is_nan());
    assert_eq!(out[2], 3.0);
    assert_eq!(out[3], 6.0);
    assert!(cumsum_skipna(&[]).is_empty());
}

#[test]
fn test_specific_capacity_and_efficiency() {
    let (cell, mut dataset) = synthetic(3);
    make_summary(&mut dataset, &SummaryOptions::minimal()).unwrap();
    assert!(dataset.summary_made());

    let summary = dataset.summary.as_ref().unwrap();
    assert_eq!(summary.cycle_index, vec![1, 2, 3]);

    let discharge = column(&dataset, col::DISCHARGE_CAPACITY);
    let charge = column(&dataset, col::CHARGE_CAPACITY);
    let raw_discharge = column(&dataset, col::RAW_DISCHARGE_CAPACITY);
    for (i, cycle) in (1..=3).enumerate() {
        assert_close(raw_discharge[i], cell.discharge_capacity(cycle));
        assert_close(discharge[i], cell.discharge_capacity(cycle) * 1e6);
        assert_close(charge[i], cell.charge_capacity(cycle) * 1e6);
    }

    for &ce in column(&dataset, col::COULOMBIC_EFFICIENCY) {
        assert_close(ce, 98.0);
    }
    let difference = column(&dataset, col::COULOMBIC_DIFFERENCE);
    assert_close(difference[0], charge[0] - discharge[0]);
}

#[test]
fn test_cumulated_columns() {
    let (_, mut dataset) = synthetic(5);
    make_summary(&mut dataset, &SummaryOptions::minimal()).unwrap();

    let charge = column(&dataset, col::CHARGE_CAPACITY);
    let cumulated = column(&dataset, col::CUMULATED_CHARGE_CAPACITY);
    assert_eq!(cumulated[0], charge[0]);
    for n in 1..charge.len() {
        assert_close(cumulated[n], cumulated[n - 1] + charge[n]);
    }
}

#[test]
fn test_capacity_loss() {
    let (_, mut dataset) = synthetic(4);
    make_summary(&mut dataset, &SummaryOptions::minimal()).unwrap();

    let loss = column(&dataset, col::DISCHARGE_CAPACITY_LOSS);
    assert!(loss[0].is_nan());
    assert_close(loss[1], 10.0);
    assert_close(loss[3], 10.0);

    let cumulated = column(&dataset, col::CUMULATED_DISCHARGE_CAPACITY_LOSS);
    assert!(cumulated[0].is_nan());
    assert_close(cumulated[1], 10.0);
    assert_close(cumulated[3], 30.0);
}

#[test]
fn test_cathode_mode_swaps_half_cycles() {
    let (_, mut dataset) = synthetic(2);
    let options = SummaryOptions {
        cycle_mode: CycleMode::Cathode,
        ..SummaryOptions::minimal()
    };
    make_summary(&mut dataset, &options).unwrap();

    let ce = column(&dataset, col::COULOMBIC_EFFICIENCY);
    assert_close(ce[0], 100.0 / 0.98);
}

#[test]
fn test_irreversible_levels() {
    let (_, mut dataset) = synthetic(5);
    make_summary(&mut dataset, &SummaryOptions::minimal()).unwrap();

    let first = column(&dataset, col::DISCHARGE_CAPACITY);
    let second = column(&dataset, col::CHARGE_CAPACITY);
    let reference: f64 =
        first[..4].iter().sum::<f64>() + second[..4].iter().sum::<f64>() + first[4];

    let low = column(&dataset, col::LOW_LEVEL);
    let high = column(&dataset, col::HIGH_LEVEL);
    assert_close(low[0], 100.0 / reference * (first[0] - second[0]));
    assert_close(high[0], 100.0 / reference * (first[0] + first[0] - second[0]));
}

#[test]
fn test_irreversible_levels_without_reference_cycle() {
    let (_, mut dataset) = synthetic(3);
    make_summary(&mut dataset, &SummaryOptions::minimal()).unwrap();

    assert!(column(&dataset, col::LOW_LEVEL).iter().all(|v| v.is_nan()));
    assert!(column(&dataset, col::HIGH_LEVEL).iter().all(|v| v.is_nan()));
}

#[test]
fn test_ric_and_shifted_capacities() {
    let (_, mut dataset) = synthetic(3);
    make_summary(&mut dataset, &SummaryOptions::minimal()).unwrap();

    let first = column(&dataset, col::DISCHARGE_CAPACITY);
    let second = column(&dataset, col::CHARGE_CAPACITY);

    let ric = column(&dataset, col::CUMULATED_RIC);
    assert!(ric[0].is_nan());
    assert_close(ric[1], (first[0] - second[1]) / second[0]);

    let shifted_charge = column(&dataset, col::SHIFTED_CHARGE_CAPACITY);
    let shifted_discharge = column(&dataset, col::SHIFTED_DISCHARGE_CAPACITY);
    assert_close(shifted_charge[0], first[0] - second[0]);
    assert_close(
        shifted_charge[1],
        first[0] - second[0] + first[1] - second[1],
    );
    assert_close(shifted_discharge[1], shifted_charge[1] + first[1]);
}

#[test]
fn test_augmented_columns() {
    let (_, mut dataset) = synthetic(2);
    make_summary(&mut dataset, &SummaryOptions::full()).unwrap();
    assert!(dataset.step_table_made());

    let end_discharge = column(&dataset, col::END_VOLTAGE_DISCHARGE);
    let end_charge = column(&dataset, col::END_VOLTAGE_CHARGE);
    assert_close(end_discharge[0], 0.05);
    assert_close(end_charge[1], 1.0);

    let ir_discharge = column(&dataset, col::IR_DISCHARGE);
    assert_close(ir_discharge[0], 0.05 + 0.002 + 0.0001);
    let ir_charge = column(&dataset, col::IR_CHARGE);
    assert_close(ir_charge[1], 0.05 + 0.004 + 0.0002);

    let ocv_first_min = column(&dataset, col::OCV_FIRST_MIN);
    let ocv_first_max = column(&dataset, col::OCV_FIRST_MAX);
    assert_close(ocv_first_min[0], 0.05);
    assert_close(ocv_first_max[0], 0.15);
    // no falling relaxation in the synthetic profile
    assert_eq!(column(&dataset, col::OCV_SECOND_MAX), &[0.0, 0.0]);
}

#[test]
fn test_missing_ir_column_gives_zeros() {
    let cell = SyntheticCell {
        cycles: 2,
        with_internal_resistance: false,
        ..Default::default()
    };
    let mut dataset = cell.build_dataset("no-ir");
    make_summary(&mut dataset, &SummaryOptions::default()).unwrap();
    assert_eq!(column(&dataset, col::IR_CHARGE), &[0.0, 0.0]);
}

#[test]
fn test_augmented_columns_precede_derived_columns() {
    let (_, mut dataset) = synthetic(1);
    make_summary(&mut dataset, &SummaryOptions::default()).unwrap();
    let names = dataset.summary.as_ref().unwrap().column_names();
    let ir = names.iter().position(|n| *n == col::IR_CHARGE).unwrap();
    let derived = names
        .iter()
        .position(|n| *n == col::DISCHARGE_CAPACITY)
        .unwrap();
    assert_eq!(names[0], col::RAW_CHARGE_CAPACITY);
    assert!(ir < derived);
}

#[test]
fn test_date_conversion() {
    let (_, mut dataset) = synthetic(1);
    make_summary(&mut dataset, &SummaryOptions::default()).unwrap();
    let texts = dataset
        .summary
        .as_ref()
        .and_then(|s| s.date_time_txt.clone())
        .unwrap();
    assert!(texts[0].starts_with("2020-01-01"));
}

#[test]
fn test_stat_rows_selection() {
    let (_, mut dataset) = synthetic(3);
    let raw = dataset.raw.as_ref().unwrap();
    let last = raw.last_row_per_cycle();
    dataset.stat_data_points = Some(vec![raw.data_point[last[&1]], raw.data_point[last[&3]]]);

    let options = SummaryOptions {
        use_stat_rows: true,
        ..SummaryOptions::minimal()
    };
    make_summary(&mut dataset, &options).unwrap();
    assert_eq!(dataset.summary.as_ref().unwrap().cycle_index, vec![1, 3]);
}

#[test]
fn test_missing_cycle_is_skipped() {
    let (_, mut dataset) = synthetic(3);
    let raw = dataset.raw.as_ref().unwrap();
    let keep: Vec<usize> = (0..raw.len()).filter(|&i| raw.cycle_index[i] != 2).collect();
    dataset.raw = Some(raw.select(&keep));

    make_summary(&mut dataset, &SummaryOptions::minimal()).unwrap();
    assert_eq!(dataset.summary.as_ref().unwrap().cycle_index, vec![1, 3]);
}

#[test]
fn test_empty_dataset() {
    let mut dataset = Dataset::new(DatasetInfo::new("empty"));
    let err = make_summary(&mut dataset, &SummaryOptions::default()).unwrap_err();
    assert!(matches!(err, SummaryError::EmptyDataset));
    assert!(!dataset.summary_made());
    assert!(!dataset.step_table_made());
}

#[test]
fn test_invalid_mass() {
    let (_, mut dataset) = synthetic(1);
    dataset.info.mass = 0.0;
    let err = make_summary(&mut dataset, &SummaryOptions::minimal()).unwrap_err();
    assert!(matches!(err, SummaryError::InvalidMass(_)));
}

#[test]
fn test_summary_append_fills_missing_columns() {
    let mut left = SummaryTable::new(vec![1], vec![10], vec![1.0]);
    left.insert("a", vec![1.0]).unwrap();
    let mut right = SummaryTable::new(vec![1], vec![5], vec![2.0]);
    right.insert("b", vec![2.0]).unwrap();
    right.offset(1, 1.0);

    left.append(right);
    assert_eq!(left.cycle_index, vec![1, 2]);
    assert_eq!(left.data_point, vec![10, 5]);
    assert_eq!(left.test_time, vec![1.0, 3.0]);
    assert!(left.get("a").unwrap()[1].is_nan());
    assert!(left.get("b").unwrap()[0].is_nan());
    assert!(left.insert("c", vec![1.0]).is_err());
}
