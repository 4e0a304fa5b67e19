//! Generator for synthetic galvanostatic cycling tests.
//!
//! Every cycle has four steps in anode order: rest, discharge, open circuit
//! relaxation (voltage rising) and charge. Capacities fade slowly with the
//! cycle number so that losses and efficiencies are non-trivial.

use crate::dataset::{Dataset, RawRow, RawTable};
use crate::metadata::{xldate_to_datetime, DatasetInfo};

/// Parameters of a synthetic test
#[derive(Debug, Clone)]
pub struct SyntheticCell {
    /// Number of cycles
    pub cycles: usize,
    /// Samples per step
    pub points_per_step: usize,
    /// Active mass in mg
    pub mass: f64,
    /// Discharge capacity of the first cycle (Ah)
    pub initial_capacity: f64,
    /// Capacity lost per cycle (Ah)
    pub fade_per_cycle: f64,
    /// Charge capacity as a fraction of the discharge capacity
    pub efficiency: f64,
    /// Applied current magnitude (A)
    pub current: f64,
    /// Seconds between samples
    pub sample_interval: f64,
    /// Start time as an Excel serial day number, `None` for no date column
    pub start_xldate: Option<f64>,
    /// Whether to emit an internal resistance column
    pub with_internal_resistance: bool,
}

impl Default for SyntheticCell {
    fn default() -> Self {
        Self {
            cycles: 5,
            points_per_step: 10,
            mass: 1.0,
            initial_capacity: 0.0012,
            fade_per_cycle: 0.000_01,
            efficiency: 0.98,
            current: 0.001,
            sample_interval: 60.0,
            start_xldate: Some(43831.0),
            with_internal_resistance: true,
        }
    }
}

/// Step numbers used by the generator
pub mod steps {
    /// Rest step
    pub const REST: i32 = 1;
    /// Discharge step
    pub const DISCHARGE: i32 = 2;
    /// Relaxation step after discharge
    pub const RELAX: i32 = 3;
    /// Charge step
    pub const CHARGE: i32 = 4;
}

struct Cursor {
    data_point: i64,
    test_time: f64,
}

impl SyntheticCell {
    /// Discharge capacity (Ah) of a cycle
    pub fn discharge_capacity(&self, cycle: usize) -> f64 {
        self.initial_capacity - self.fade_per_cycle * (cycle as f64 - 1.0)
    }

    /// Charge capacity (Ah) of a cycle
    pub fn charge_capacity(&self, cycle: usize) -> f64 {
        self.discharge_capacity(cycle) * self.efficiency
    }

    /// Generate the raw table
    pub fn build_raw(&self) -> RawTable {
        let mut table = RawTable::new();
        let mut cursor = Cursor {
            data_point: 0,
            test_time: 0.0,
        };
        let n = self.points_per_step.max(2);

        for cycle in 1..=self.cycles {
            let cap_d = self.discharge_capacity(cycle);
            let cap_c = self.charge_capacity(cycle);
            let c = cycle as i32;

            // rest: tiny voltage drift, no current
            self.emit_step(&mut table, &mut cursor, c, steps::REST, n, |f| {
                (0.0, 0.800 + 0.001 * f, 0.0, 0.0)
            });
            // discharge: voltage falls, discharge capacity grows
            self.emit_step(&mut table, &mut cursor, c, steps::DISCHARGE, n, |f| {
                (-self.current, 1.0 - 0.95 * f, 0.0, cap_d * f)
            });
            // relaxation: voltage recovers without current
            self.emit_step(&mut table, &mut cursor, c, steps::RELAX, n, |f| {
                (0.0, 0.05 + 0.10 * f, 0.0, cap_d)
            });
            // charge: voltage rises, charge capacity grows
            self.emit_step(&mut table, &mut cursor, c, steps::CHARGE, n, |f| {
                (self.current, 0.15 + 0.85 * f, cap_c * f, cap_d)
            });
        }
        table
    }

    fn emit_step<F>(
        &self,
        table: &mut RawTable,
        cursor: &mut Cursor,
        cycle: i32,
        step: i32,
        n: usize,
        profile: F,
    ) where
        F: Fn(f64) -> (f64, f64, f64, f64),
    {
        for i in 0..n {
            let fraction = i as f64 / (n - 1) as f64;
            let (current, voltage, charge, discharge) = profile(fraction);
            cursor.data_point += 1;
            table.push(RawRow {
                data_point: cursor.data_point,
                test_time: cursor.test_time,
                step_time: i as f64 * self.sample_interval,
                date_time: self
                    .start_xldate
                    .map(|start| start + cursor.test_time / 86_400.0),
                step_index: step,
                cycle_index: cycle,
                sub_step_index: 1,
                current,
                voltage,
                charge_capacity: charge,
                discharge_capacity: discharge,
                internal_resistance: if self.with_internal_resistance {
                    Some(0.05 + 0.001 * step as f64 + 0.0001 * cycle as f64)
                } else {
                    None
                },
            });
            cursor.test_time += self.sample_interval;
        }
    }

    /// Generate a dataset with info filled in
    pub fn build_dataset(&self, name: &str) -> Dataset {
        let mut info = DatasetInfo::new(name);
        info.set_mass(self.mass);
        info.start_datetime = self.start_xldate.and_then(xldate_to_datetime);
        let raw = self.build_raw();
        let rows = raw.len();
        let mut dataset = Dataset::from_raw(raw, info);
        dataset.raw_data_files_length.push(rows);
        dataset
    }
}
