use super::*;
use crate::dataset::{Dataset, RawRow, RawTable};
use crate::metadata::{DatasetInfo, RawLimits};
use crate::synthetic::{steps, SyntheticCell};

fn synthetic_dataset(cycles: usize) -> Dataset {
    SyntheticCell {
        cycles,
        ..Default::default()
    }
    .build_dataset("synthetic")
}

fn single_row(cycle: i32, step: i32, current: f64, voltage: f64) -> RawRow {
    RawRow {
        data_point: 1,
        cycle_index: cycle,
        step_index: step,
        sub_step_index: 1,
        current,
        voltage,
        ..Default::default()
    }
}

#[test]
fn test_relative_delta() {
    assert_eq!(relative_delta(2.0, 3.0), 50.0);
    assert_eq!(relative_delta(0.0, 4.0), 1.0);
    assert_eq!(relative_delta(0.0, 0.0), 0.0);
    assert_eq!(relative_delta(-1.0, -1.0), 0.0);
}

#[test]
fn test_column_stats() {
    let stats = ColumnStats::from_values(&[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(stats.avr, 2.5);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 4.0);
    assert_eq!(stats.first, 1.0);
    assert_eq!(stats.last, 4.0);
    assert_eq!(stats.delta, 300.0);
    assert!((stats.std - 1.290_994_448_735_805_6).abs() < 1e-12);
}

#[test]
fn test_column_stats_single_value() {
    let stats = ColumnStats::from_values(&[5.0]);
    assert!(stats.std.is_nan());
    assert_eq!(stats.delta, 0.0);

    let empty = ColumnStats::from_values(&[]);
    assert!(empty.avr.is_nan());
}

#[test]
fn test_step_type_labels() {
    for step_type in StepType::ALL {
        assert_eq!(step_type.as_str().parse::<StepType>().unwrap(), step_type);
    }
    assert!(matches!(
        "boost".parse::<StepType>(),
        Err(StepError::UnknownStepType(_))
    ));
}

#[test]
fn test_heuristic_classification() {
    let mut dataset = synthetic_dataset(3);
    make_step_table(&mut dataset, None).unwrap();
    let table = dataset.steps.as_ref().unwrap();

    assert_eq!(table.len(), 12);
    for record in &table.records {
        let expected = match record.step {
            steps::REST => StepType::Rest,
            steps::DISCHARGE => StepType::Discharge,
            steps::RELAX => StepType::OcvrlxUp,
            steps::CHARGE => StepType::Charge,
            _ => unreachable!(),
        };
        assert_eq!(record.step_type, Some(expected), "cycle {} step {}", record.cycle, record.step);
    }
}

#[test]
fn test_every_group_labelled() {
    let mut dataset = synthetic_dataset(4);
    make_step_table(&mut dataset, None).unwrap();
    let table = dataset.steps.unwrap();
    assert!(table.records.iter().all(|r| r.step_type.is_some()));
}

#[test]
fn test_ir_rule_wins_for_unchanged_step() {
    // a single sample has zero delta everywhere
    let raw = RawTable::from_rows([single_row(1, 1, 0.0, 3.2)]);
    let table = build_step_table(&raw, &RawLimits::default(), None);
    assert_eq!(table.records[0].step_type, Some(StepType::Ir));
}

#[test]
fn test_unmatched_step_is_not_known() {
    // current flows but no capacity changes and voltage moves
    let raw = RawTable::from_rows([
        RawRow {
            data_point: 1,
            ..single_row(1, 1, 0.5, 3.0)
        },
        RawRow {
            data_point: 2,
            ..single_row(1, 1, 0.5, 3.5)
        },
    ]);
    let table = build_step_table(&raw, &RawLimits::default(), None);
    assert_eq!(table.records[0].step_type, Some(StepType::NotKnown));
}

#[test]
fn test_sub_steps_fold_into_step() {
    let raw = RawTable::from_rows((1..=4).map(|point| RawRow {
        data_point: point,
        sub_step_index: if point <= 2 { 1 } else { 2 },
        ..single_row(1, 1, 0.0, 3.0)
    }));
    let table = build_step_table(&raw, &RawLimits::default(), None);
    assert_eq!(table.len(), 1);
    let record = &table.records[0];
    assert_eq!((record.cycle, record.step, record.sub_step), (1, 1, 1));
    assert_eq!(record.point.first, 1.0);
    assert_eq!(record.point.last, 4.0);
}

#[test]
fn test_rule_order_last_match_wins() {
    let conditions = rules::StepConditions {
        no_current: true,
        voltage_stable: true,
        no_change: true,
        ..Default::default()
    };
    assert_eq!(
        rules::classify(&conditions, &rules::default_rules()),
        StepType::Ir
    );

    let conditions = rules::StepConditions {
        no_current: true,
        voltage_stable: true,
        ..Default::default()
    };
    assert_eq!(
        rules::classify(&conditions, &rules::default_rules()),
        StepType::Rest
    );
}

#[test]
fn test_empty_dataset_is_rejected() {
    let mut dataset = Dataset::new(DatasetInfo::new("empty"));
    assert!(matches!(
        make_step_table(&mut dataset, None),
        Err(StepError::EmptyDataset)
    ));
    assert!(dataset.steps.is_none());
}

#[test]
fn test_internal_resistance_aggregates() {
    let mut dataset = synthetic_dataset(1);
    make_step_table(&mut dataset, None).unwrap();
    assert!(dataset.steps.as_ref().unwrap().has_ir());

    let mut without_ir = SyntheticCell {
        cycles: 1,
        with_internal_resistance: false,
        ..Default::default()
    }
    .build_dataset("no-ir");
    make_step_table(&mut without_ir, None).unwrap();
    assert!(!without_ir.steps.as_ref().unwrap().has_ir());
}

#[test]
fn test_long_specification_overrides() {
    let csv = "cycle,step,type,info\n1,2,cv_discharge,custom\n2,4,ir,\n";
    let spec = StepSpecification::from_reader(csv.as_bytes(), false).unwrap();
    assert_eq!(spec.entries().len(), 2);

    let mut dataset = synthetic_dataset(2);
    make_step_table(&mut dataset, Some(&spec)).unwrap();
    let table = dataset.steps.unwrap();

    let find = |cycle: i32, step: i32| {
        table
            .records
            .iter()
            .find(|r| r.cycle == cycle && r.step == step)
            .unwrap()
    };
    assert_eq!(find(1, 2).step_type, Some(StepType::CvDischarge));
    assert_eq!(find(1, 2).info.as_deref(), Some("custom"));
    assert_eq!(find(2, 4).step_type, Some(StepType::Ir));
    // not covered by the specification
    assert_eq!(find(1, 1).step_type, None);
    assert_eq!(find(1, 1).type_label(), "");
    assert_eq!(find(2, 2).step_type, None);
}

#[test]
fn test_short_specification_applies_to_all_cycles() {
    let csv = "step,type\n1,rest\n2,discharge\n3,ocvrlx_up\n4,charge\n";
    let spec = StepSpecification::from_reader(csv.as_bytes(), true).unwrap();
    assert!(spec.is_short());

    let mut dataset = synthetic_dataset(3);
    make_step_table(&mut dataset, Some(&spec)).unwrap();
    let table = dataset.steps.unwrap();
    assert!(table
        .records
        .iter()
        .filter(|r| r.step == 2)
        .all(|r| r.step_type == Some(StepType::Discharge)));
}

#[test]
fn test_malformed_specification() {
    let missing_type = "cycle,step\n1,1\n";
    assert!(matches!(
        StepSpecification::from_reader(missing_type.as_bytes(), false),
        Err(StepError::MalformedSpecification(_))
    ));

    let missing_cycle = "step,type\n1,rest\n";
    assert!(matches!(
        StepSpecification::from_reader(missing_cycle.as_bytes(), false),
        Err(StepError::MalformedSpecification(_))
    ));

    let unknown_type = "step,type\n1,boost\n";
    assert!(matches!(
        StepSpecification::from_reader(unknown_type.as_bytes(), true),
        Err(StepError::MalformedSpecification(_))
    ));
}

#[test]
fn test_step_numbers() {
    let mut dataset = synthetic_dataset(3);
    make_step_table(&mut dataset, None).unwrap();
    let table = dataset.steps.unwrap();

    let charge = table.step_numbers("charge", false, None).unwrap();
    assert_eq!(charge.len(), 3);
    assert_eq!(charge[&1], vec![steps::CHARGE]);

    let ocv = table.step_numbers("ocv", false, Some(2)).unwrap();
    assert_eq!(ocv.len(), 1);
    assert_eq!(ocv[&2], vec![steps::RELAX]);

    let both = table.step_numbers("charge_discharge", true, Some(1)).unwrap();
    assert_eq!(both[&1], vec![steps::CHARGE, steps::DISCHARGE]);

    let missing = table.step_numbers("cv_charge", false, None).unwrap();
    assert!(missing.values().all(|steps| steps == &vec![0]));

    assert!(table.step_numbers("boost", false, None).is_err());
}

#[test]
fn test_resolve_all_ctypes() {
    let types = resolve_step_types("charge", true).unwrap();
    assert_eq!(
        types,
        vec![StepType::Charge, StepType::ChargeCv, StepType::CvCharge]
    );
}

#[test]
fn test_validate_step_table() {
    let mut dataset = synthetic_dataset(2);
    assert!(matches!(
        validate_step_table(&dataset, false),
        Err(StepError::StepTableNotMade)
    ));
    make_step_table(&mut dataset, None).unwrap();
    assert!(validate_step_table(&dataset, true).unwrap());

    if let Some(steps) = dataset.steps.as_mut() {
        steps.records.pop();
    }
    assert!(validate_step_table(&dataset, false).unwrap());
    assert!(!validate_step_table(&dataset, true).unwrap());
}

#[test]
fn test_ensure_step_table_keeps_existing() {
    let mut dataset = synthetic_dataset(1);
    dataset.steps = Some(StepTable::default());
    ensure_step_table(&mut dataset).unwrap();
    assert!(dataset.steps.as_ref().unwrap().is_empty());
}
