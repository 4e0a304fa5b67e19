use super::*;
use crate::dataset::Dataset;
use crate::metadata::{CycleMode, DatasetInfo};
use crate::steps::{make_step_table, StepError, StepType};
use crate::synthetic::{steps, SyntheticCell};

fn dataset(cycles: usize) -> Dataset {
    let mut dataset = SyntheticCell {
        cycles,
        ..Default::default()
    }
    .build_dataset("curves");
    make_step_table(&mut dataset, None).unwrap();
    dataset
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_method_names() {
    for method in CurveMethod::ALL {
        assert_eq!(method.as_str().parse::<CurveMethod>().unwrap(), method);
    }
    assert_eq!("Forth".parse::<CurveMethod>().unwrap(), CurveMethod::Forth);
    assert!("sideways".parse::<CurveMethod>().is_err());
    assert_eq!(
        CurveMethod::parse_or_default("sideways"),
        CurveMethod::BackAndForth
    );
}

#[test]
fn test_get_ccap_and_dcap() {
    let dataset = dataset(2);
    let charge = get_ccap(&dataset, 1, 1e6).unwrap();
    let discharge = get_dcap(&dataset, 1, 1e6).unwrap();

    assert_eq!(charge.len(), 10);
    assert!(close(charge.capacity[0], 0.0));
    assert!(close(charge.max_capacity(), 1176.0));
    assert!(close(discharge.max_capacity(), 1200.0));
    assert!(close(discharge.voltage[0], 1.0));
}

#[test]
fn test_missing_step_is_reported() {
    let dataset = dataset(1);
    match get_ccap(&dataset, 7, 1e6) {
        Err(CurveError::NoDataForStep { cycle, step_type }) => {
            assert_eq!(cycle, 7);
            assert_eq!(step_type, "charge");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_requires_step_table() {
    let dataset = SyntheticCell::default().build_dataset("no steps");
    assert!(matches!(
        get_ccap(&dataset, 1, 1.0),
        Err(CurveError::StepError(StepError::StepTableNotMade))
    ));
}

#[test]
fn test_empty_dataset() {
    let dataset = Dataset::new(DatasetInfo::new("empty"));
    assert!(matches!(
        get_cap(&dataset, None, &CurveOptions::default()),
        Err(CurveError::EmptyDataset)
    ));
}

#[test]
fn test_back_and_forth_continuity() {
    let dataset = dataset(3);
    let curves = get_cap(&dataset, None, &CurveOptions::default()).unwrap();
    assert_eq!(curves.len(), 3);

    let first = &curves[0];
    assert!(close(first.first.capacity[0], 0.0));
    // the second half-cycle runs back from the end of the first one
    assert!(close(first.second.capacity[0], 1200.0));
    assert!(close(first.second.min_capacity(), 24.0));

    let carry = first.second.min_capacity();
    assert!(close(curves[1].first.capacity[0], carry));
    let carry = curves[1].second.min_capacity();
    assert!(close(curves[2].first.capacity[0], carry));
}

#[test]
fn test_forth() {
    let dataset = dataset(2);
    let options = CurveOptions {
        method: CurveMethod::Forth,
        ..Default::default()
    };
    let curves = get_cap(&dataset, None, &options).unwrap();

    assert!(close(curves[0].second.capacity[0], 1200.0));
    assert!(close(curves[0].second.max_capacity(), 2376.0));
    assert!(close(curves[1].first.capacity[0], 2376.0));
}

#[test]
fn test_forth_and_forth_with_shift() {
    let dataset = dataset(2);
    let options = CurveOptions {
        method: CurveMethod::ForthAndForth,
        shift: 5.0,
        ..Default::default()
    };
    let curves = get_cap(&dataset, None, &options).unwrap();
    for curve in &curves {
        assert!(close(curve.first.capacity[0], 5.0));
        assert!(close(curve.second.capacity[0], 5.0));
    }
}

#[test]
fn test_cathode_mode_starts_with_charge() {
    let dataset = dataset(1);
    let options = CurveOptions {
        cycle_mode: CycleMode::Cathode,
        ..Default::default()
    };
    let curves = get_cap(&dataset, None, &options).unwrap();
    assert!(close(curves[0].first.max_capacity(), 1176.0));
    assert!(close(curves[0].first.voltage[0], 0.15));
}

#[test]
fn test_loop_stops_at_missing_cycle() {
    let dataset = dataset(2);
    let curves = get_cap(&dataset, Some(&[1, 2, 9, 1][..]), &CurveOptions::default()).unwrap();
    assert_eq!(curves.iter().map(|c| c.cycle).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_categorical() {
    let dataset = dataset(2);
    let curves = get_cap(&dataset, None, &CurveOptions::default()).unwrap();
    let points = categorical(&curves);

    assert_eq!(points.len(), 40);
    assert_eq!(points[0].direction, -1);
    assert_eq!(points[10].direction, 1);
    assert_eq!(points[20].cycle, 2);
    assert_eq!(curves[0].concatenated().len(), 20);
}

#[test]
fn test_get_ocv() {
    let dataset = dataset(3);

    let all = get_ocv(&dataset, "ocv", None).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|c| c.step_type == StepType::OcvrlxUp));
    assert!(all.iter().all(|c| c.step == steps::RELAX));

    let one = get_ocv(&dataset, "ocvrlx_up", Some(2)).unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].cycle, 2);
    assert!(close(one[0].voltage[0], 0.05));

    assert!(get_ocv(&dataset, "ocvrlx_down", Some(2)).unwrap().is_empty());
}
