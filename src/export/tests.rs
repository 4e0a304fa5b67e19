use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::steps::make_step_table;
use crate::summary::{make_summary, SummaryOptions};
use crate::synthetic::SyntheticCell;

fn processed(cycles: usize) -> Dataset {
    let mut dataset = SyntheticCell {
        cycles,
        ..Default::default()
    }
    .build_dataset("export");
    make_step_table(&mut dataset, None).unwrap();
    make_summary(&mut dataset, &SummaryOptions::default()).unwrap();
    dataset
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

#[test]
fn test_base_name() {
    let mut dataset = processed(1);
    assert_eq!(export_base_name(&dataset), "export");

    dataset.info.loaded_from = Some("/data/cell_07.res".to_string());
    assert_eq!(export_base_name(&dataset), "cell_07");

    dataset.merged = true;
    dataset.raw_data_files = vec![Default::default(), Default::default()];
    assert_eq!(export_base_name(&dataset), "export_merged_002");
}

#[test]
fn test_export_tables() -> Result<(), ExportError> {
    let dir = tempdir()?;
    let dataset = processed(2);
    let written = to_csv(
        &dataset,
        dir.path(),
        &ExportOptions::default(),
        &CurveOptions::default(),
    )?;
    assert_eq!(written.len(), 3);

    let (header, rows) = read_csv(&dir.path().join("export_normal.csv"));
    assert_eq!(header[0], "data_point");
    assert_eq!(rows.len(), 80);

    let (header, rows) = read_csv(&dir.path().join("export_stats.csv"));
    assert_eq!(header[0], "date_time_txt");
    assert!(header.iter().any(|h| h == "coulombic_efficiency"));
    assert_eq!(rows.len(), 2);

    let (header, rows) = read_csv(&dir.path().join("export_steps.csv"));
    assert!(header.iter().any(|h| h == "voltage_delta"));
    assert!(header.iter().any(|h| h == "ir_avr"));
    assert_eq!(rows.len(), 8);
    Ok(())
}

#[test]
fn test_nan_is_empty_field() -> Result<(), ExportError> {
    let dir = tempdir()?;
    let dataset = processed(2);
    to_csv(
        &dataset,
        dir.path(),
        &ExportOptions::default(),
        &CurveOptions::default(),
    )?;
    let (header, rows) = read_csv(&dir.path().join("export_stats.csv"));
    let loss = header
        .iter()
        .position(|h| h == "discharge_capacity_loss")
        .unwrap();
    assert_eq!(rows[0][loss], "");
    assert!(!rows[1][loss].is_empty());
    Ok(())
}

#[test]
fn test_export_cycles() -> Result<(), ExportError> {
    let dir = tempdir()?;
    let dataset = processed(3);
    let options = ExportOptions {
        raw: false,
        summary: false,
        steps: false,
        cycles: true,
        last_cycle: Some(2),
        ..Default::default()
    };
    let written = to_csv(&dataset, dir.path(), &options, &CurveOptions::default())?;
    assert_eq!(written.len(), 1);

    let (header, rows) = read_csv(&written[0]);
    assert_eq!(
        header,
        vec![
            "cap cycle_no 1",
            "voltage cycle_no 1",
            "cap cycle_no 2",
            "voltage cycle_no 2"
        ]
    );
    assert_eq!(rows.len(), 20);
    // every cycle starts at the shift
    assert_eq!(rows[0][0].parse::<f64>().unwrap(), 0.0);
    assert_eq!(rows[0][2].parse::<f64>().unwrap(), 0.0);
    Ok(())
}

#[test]
fn test_shifted_cycles_continue() -> Result<(), ExportError> {
    let dataset = processed(2);
    let options = ExportOptions {
        shifted: true,
        method: CurveMethod::Forth,
        ..Default::default()
    };
    let curves = cycle_curves(&dataset, &options, &CurveOptions::default())?;
    assert_eq!(curves.len(), 2);
    let end_of_first = *curves[0].1.capacity.last().unwrap();
    assert!((end_of_first - 24.0).abs() < 1e-6);
    assert!((curves[1].1.capacity[0] - end_of_first).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_write_cycles_pads_shorter_cycles() -> Result<(), ExportError> {
    let curves = vec![
        (
            1,
            crate::curves::CurveSeries {
                capacity: vec![0.0, 1.0, 2.0],
                voltage: vec![1.0, 0.5, 0.1],
            },
        ),
        (
            2,
            crate::curves::CurveSeries {
                capacity: vec![0.0],
                voltage: vec![1.0],
            },
        ),
    ];
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_cycles(&curves, &mut writer)?;
    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "2,0.1,,");
    Ok(())
}

#[test]
fn test_empty_dataset() {
    let dir = tempdir().unwrap();
    let dataset = Dataset::default();
    assert!(matches!(
        to_csv(
            &dataset,
            dir.path(),
            &ExportOptions::default(),
            &CurveOptions::default()
        ),
        Err(ExportError::EmptyDataset)
    ));
}
