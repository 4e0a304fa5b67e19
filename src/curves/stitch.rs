use log::debug;

use super::{get_ccap, get_dcap, CurveError, CurveMethod, CurveSeries};
use crate::dataset::Dataset;
use crate::metadata::{CycleMode, TargetUnits};

/// Options of the curve extractor
#[derive(Debug, Clone, PartialEq)]
pub struct CurveOptions {
    /// Layout of consecutive half-cycles
    pub method: CurveMethod,
    /// Start value of the capacity axis
    pub shift: f64,
    /// Which half-cycle comes first
    pub cycle_mode: CycleMode,
    /// Units of the specific capacities
    pub target_units: TargetUnits,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            method: CurveMethod::BackAndForth,
            shift: 0.0,
            cycle_mode: CycleMode::Anode,
            target_units: TargetUnits::default(),
        }
    }
}

/// Both half-cycles of one cycle, already laid out on the capacity axis
#[derive(Debug, Clone, PartialEq)]
pub struct CycleCurves {
    /// Cycle number
    pub cycle: i32,
    /// First half-cycle (discharge in anode mode)
    pub first: CurveSeries,
    /// Second half-cycle
    pub second: CurveSeries,
}

impl CycleCurves {
    /// Capacity and voltage of the first then the second half-cycle
    pub fn concatenated(&self) -> CurveSeries {
        let mut out = self.first.clone();
        out.capacity.extend_from_slice(&self.second.capacity);
        out.voltage.extend_from_slice(&self.second.voltage);
        out
    }
}

/// One sample of a categorical curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Cycle number
    pub cycle: i32,
    /// Voltage
    pub voltage: f64,
    /// Capacity after layout
    pub capacity: f64,
    /// -1 for the first half-cycle, +1 for the second
    pub direction: i8,
}

/// Lay out one cycle and return the carry for the next one
fn stitch(
    first: &mut CurveSeries,
    second: &mut CurveSeries,
    method: CurveMethod,
    shift: f64,
    carry: f64,
) -> f64 {
    match method {
        CurveMethod::BackAndForth => {
            let end = first.max_capacity();
            second.reflect(end);
            second.translate(carry);
            first.translate(carry);
            second.min_capacity()
        }
        CurveMethod::Forth => {
            let end = first.max_capacity();
            second.translate(end + carry);
            first.translate(carry);
            second.max_capacity()
        }
        CurveMethod::ForthAndForth => {
            first.translate(shift);
            second.translate(shift);
            carry
        }
    }
}

/// Capacity curves of the given cycles, or of every cycle.
///
/// The first cycle starts at `options.shift`. A cycle without a charge or
/// discharge step ends the loop; the curves gathered so far are returned.
pub fn get_cap(
    dataset: &Dataset,
    cycles: Option<&[i32]>,
    options: &CurveOptions,
) -> Result<Vec<CycleCurves>, CurveError> {
    if dataset.is_empty() {
        return Err(CurveError::EmptyDataset);
    }
    let converter = dataset.specific_converter(&options.target_units);
    let cycles = match cycles {
        Some(cycles) => cycles.to_vec(),
        None => dataset.cycle_numbers(),
    };

    let mut carry = options.shift;
    let mut out = Vec::with_capacity(cycles.len());
    for cycle in cycles {
        debug!("Processing cycle {}", cycle);
        let (charge, discharge) = match (
            get_ccap(dataset, cycle, converter),
            get_dcap(dataset, cycle, converter),
        ) {
            (Ok(charge), Ok(discharge)) => (charge, discharge),
            (Err(err @ CurveError::NoDataForStep { .. }), _)
            | (_, Err(err @ CurveError::NoDataForStep { .. })) => {
                debug!("{}, stopping", err);
                break;
            }
            (Err(err), _) | (_, Err(err)) => return Err(err),
        };

        let (mut first, mut second) = match options.cycle_mode {
            CycleMode::Anode => (discharge, charge),
            CycleMode::Cathode => (charge, discharge),
        };
        carry = stitch(&mut first, &mut second, options.method, options.shift, carry);
        debug!("Carry after cycle {}: {}", cycle, carry);
        out.push(CycleCurves {
            cycle,
            first,
            second,
        });
    }
    Ok(out)
}

/// Flatten curves into points tagged with their half-cycle
pub fn categorical(curves: &[CycleCurves]) -> Vec<CurvePoint> {
    let mut points = Vec::new();
    for curve in curves {
        for (series, direction) in [(&curve.first, -1), (&curve.second, 1)] {
            points.extend(
                series
                    .capacity
                    .iter()
                    .zip(&series.voltage)
                    .map(|(&capacity, &voltage)| CurvePoint {
                        cycle: curve.cycle,
                        voltage,
                        capacity,
                        direction,
                    }),
            );
        }
    }
    points
}
