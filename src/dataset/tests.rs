use super::*;
use crate::metadata::{datetime_to_xldate, xldate_to_datetime, DatasetInfo};
use crate::steps::make_step_table;
use crate::summary::{make_summary, SummaryOptions};
use crate::synthetic::SyntheticCell;

fn row(data_point: i64, cycle: i32) -> RawRow {
    RawRow {
        data_point,
        test_time: data_point as f64,
        cycle_index: cycle,
        step_index: 1,
        sub_step_index: 1,
        ..Default::default()
    }
}

fn cell(cycles: usize, start_xldate: Option<f64>) -> SyntheticCell {
    SyntheticCell {
        cycles,
        points_per_step: 4,
        start_xldate,
        ..Default::default()
    }
}

#[test]
fn test_push_backfills_optional_columns() {
    let mut table = RawTable::new();
    table.push(row(1, 1));
    table.push(RawRow {
        internal_resistance: Some(0.5),
        ..row(2, 1)
    });

    let ir = table.internal_resistance.as_ref().unwrap();
    assert!(ir[0].is_nan());
    assert_eq!(ir[1], 0.5);
    assert!(table.date_time.is_none());
    table.validate().unwrap();
}

#[test]
fn test_validate_length_mismatch() {
    let mut table = RawTable::from_rows([row(1, 1), row(2, 1)]);
    table.voltage.pop();
    match table.validate() {
        Err(DatasetError::LengthMismatch { column, expected, actual }) => {
            assert_eq!(column, "voltage");
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_sort_by_data_point() {
    let mut table = RawTable::from_rows([row(3, 2), row(1, 1), row(2, 1)]);
    table.sort_by_data_point();
    assert_eq!(table.data_point, vec![1, 2, 3]);
    assert_eq!(table.cycle_index, vec![1, 1, 2]);
    assert_eq!(table.test_time, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_row_lookup_and_indices() {
    let table = RawTable::from_rows([row(1, 1), row(2, 1), row(3, 2)]);
    assert_eq!(table.row(2).unwrap().cycle_index, 2);
    assert!(table.row(3).is_none());
    assert_eq!(table.cycles(), vec![1, 2]);
    assert_eq!(table.last_row_per_cycle()[&1], 1);
    assert_eq!(table.step_row_index()[&(2, 1)], vec![2]);
}

#[test]
fn test_empty_dataset() {
    let dataset = Dataset::new(DatasetInfo::new("empty"));
    assert!(dataset.is_empty());
    assert!(matches!(dataset.raw(), Err(DatasetError::EmptyDataset)));
    assert_eq!(dataset.no_cycles(), 0);

    let with_empty_table = Dataset::from_raw(RawTable::new(), DatasetInfo::new("zero rows"));
    assert!(with_empty_table.is_empty());
}

#[test]
fn test_merge_offsets() {
    let first = cell(2, Some(43831.0)).build_dataset("first");
    let second = cell(3, Some(43832.0)).build_dataset("second");
    let first_len = first.raw.as_ref().unwrap().len();
    let max_dp = first.raw.as_ref().unwrap().max_data_point().unwrap();

    let merged = merge(first, second).unwrap();
    let raw = merged.raw.as_ref().unwrap();

    assert!(merged.merged);
    assert_eq!(merged.info.name, "first");
    assert_eq!(raw.data_point[first_len], max_dp + 1);
    assert_eq!(raw.cycle_index[first_len], 3);
    assert_eq!(merged.no_cycles(), 5);
    assert!((raw.test_time[first_len] - 86_400.0).abs() < 1e-3);
    assert_eq!(merged.raw_data_files_length.len(), 2);
    assert!(raw.data_point.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_merge_without_start_time() {
    let first = cell(1, None).build_dataset("first");
    let second = cell(1, None).build_dataset("second");
    let first_len = first.raw.as_ref().unwrap().len();

    let merged = merge(first, second).unwrap();
    assert_eq!(merged.raw.as_ref().unwrap().test_time[first_len], 0.0);
}

#[test]
fn test_merge_derived_tables() {
    let mut first = cell(2, Some(43831.0)).build_dataset("first");
    let mut second = cell(2, Some(43831.5)).build_dataset("second");
    make_step_table(&mut first, None).unwrap();
    make_step_table(&mut second, None).unwrap();
    make_summary(&mut first, &SummaryOptions::minimal()).unwrap();

    let merged = merge(first, second).unwrap();
    let steps = merged.steps.as_ref().unwrap();
    assert_eq!(steps.cycles(), vec![1, 2, 3, 4]);
    // only one side had a summary
    assert!(!merged.summary_made());
}

#[test]
fn test_merge_summaries() {
    let mut first = cell(2, Some(43831.0)).build_dataset("first");
    let mut second = cell(2, Some(43831.0)).build_dataset("second");
    make_summary(&mut first, &SummaryOptions::minimal()).unwrap();
    make_summary(&mut second, &SummaryOptions::minimal()).unwrap();

    let first_points = first.summary.as_ref().unwrap().data_point.clone();
    let second_points = second.summary.as_ref().unwrap().data_point.clone();

    let merged = merge(first, second).unwrap();
    let summary = merged.summary.as_ref().unwrap();
    assert_eq!(summary.cycle_index, vec![1, 2, 3, 4]);
    // data points of the appended summary are not shifted
    let expected: Vec<i64> = first_points.into_iter().chain(second_points).collect();
    assert_eq!(summary.data_point, expected);
}

#[test]
fn test_merge_summaries_offset_test_time() {
    let mut first = cell(1, Some(43831.0)).build_dataset("first");
    let mut second = cell(1, Some(43832.0)).build_dataset("second");
    make_summary(&mut first, &SummaryOptions::minimal()).unwrap();
    make_summary(&mut second, &SummaryOptions::minimal()).unwrap();
    let second_time = second.summary.as_ref().unwrap().test_time[0];
    let second_point = second.summary.as_ref().unwrap().data_point[0];

    let merged = merge(first, second).unwrap();
    let summary = merged.summary.as_ref().unwrap();
    assert_eq!(summary.cycle_index, vec![1, 2]);
    assert!((summary.test_time[1] - (second_time + 86_400.0)).abs() < 1e-3);
    assert_eq!(summary.data_point[1], second_point);
}

#[test]
fn test_merge_empty_fails() {
    let first = cell(1, None).build_dataset("first");
    let empty = Dataset::new(DatasetInfo::new("empty"));
    assert!(matches!(merge(first, empty), Err(DatasetError::EmptyDataset)));
}

#[test]
fn test_merge_guard() {
    let mut guard = MergeGuard::new(2);
    guard.register().unwrap();
    guard.register().unwrap();
    assert!(matches!(
        guard.register(),
        Err(DatasetError::TooManyFilesToMerge { limit: 2 })
    ));
    assert_eq!(guard.appended(), 3);
}

#[test]
fn test_xldate_start_time() {
    let start = xldate_to_datetime(43831.0).unwrap();
    assert!((datetime_to_xldate(start) - 43831.0).abs() < 1e-9);
}
