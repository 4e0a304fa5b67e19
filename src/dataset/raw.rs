use std::collections::BTreeMap;

use super::DatasetError;

/// A single instrument sample, used to build a [`RawTable`] row by row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawRow {
    /// Sample index
    pub data_point: i64,
    /// Seconds since the start of the test
    pub test_time: f64,
    /// Seconds since the start of the step
    pub step_time: f64,
    /// Excel serial day number, when known
    pub date_time: Option<f64>,
    /// Step number
    pub step_index: i32,
    /// Cycle number
    pub cycle_index: i32,
    /// Sub-step number
    pub sub_step_index: i32,
    /// Current
    pub current: f64,
    /// Voltage
    pub voltage: f64,
    /// Charge capacity
    pub charge_capacity: f64,
    /// Discharge capacity
    pub discharge_capacity: f64,
    /// Internal resistance, when measured
    pub internal_resistance: Option<f64>,
}

/// Raw measurements of one test in Structure-of-Arrays layout.
///
/// All columns have the same length. Optional columns are either present
/// for every row (NaN where a row had no value) or absent altogether.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Sample indices, unique and increasing
    pub data_point: Vec<i64>,
    /// Seconds since the start of the test
    pub test_time: Vec<f64>,
    /// Seconds since the start of the step
    pub step_time: Vec<f64>,
    /// Excel serial day numbers
    pub date_time: Option<Vec<f64>>,
    /// Step numbers
    pub step_index: Vec<i32>,
    /// Cycle numbers, non-decreasing
    pub cycle_index: Vec<i32>,
    /// Sub-step numbers
    pub sub_step_index: Vec<i32>,
    /// Current
    pub current: Vec<f64>,
    /// Voltage
    pub voltage: Vec<f64>,
    /// Charge capacity
    pub charge_capacity: Vec<f64>,
    /// Discharge capacity
    pub discharge_capacity: Vec<f64>,
    /// Internal resistance
    pub internal_resistance: Option<Vec<f64>>,
}

fn push_optional(column: &mut Option<Vec<f64>>, len: usize, value: Option<f64>) {
    match (column.as_mut(), value) {
        (Some(values), v) => values.push(v.unwrap_or(f64::NAN)),
        (None, Some(v)) => {
            let mut values = vec![f64::NAN; len];
            values.push(v);
            *column = Some(values);
        }
        (None, None) => {}
    }
}

fn append_optional(
    left: &mut Option<Vec<f64>>,
    left_len: usize,
    right: Option<Vec<f64>>,
    right_len: usize,
) {
    match (left.as_mut(), right) {
        (Some(values), Some(other)) => values.extend(other),
        (Some(values), None) => values.extend(std::iter::repeat(f64::NAN).take(right_len)),
        (None, Some(other)) => {
            let mut values = vec![f64::NAN; left_len];
            values.extend(other);
            *left = Some(values);
        }
        (None, None) => {}
    }
}

impl RawTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows in the given order
    pub fn from_rows<I: IntoIterator<Item = RawRow>>(rows: I) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.push(row);
        }
        table
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.data_point.len()
    }

    /// Whether the table holds no samples
    pub fn is_empty(&self) -> bool {
        self.data_point.is_empty()
    }

    /// Append one sample
    pub fn push(&mut self, row: RawRow) {
        let len = self.len();
        self.data_point.push(row.data_point);
        self.test_time.push(row.test_time);
        self.step_time.push(row.step_time);
        push_optional(&mut self.date_time, len, row.date_time);
        self.step_index.push(row.step_index);
        self.cycle_index.push(row.cycle_index);
        self.sub_step_index.push(row.sub_step_index);
        self.current.push(row.current);
        self.voltage.push(row.voltage);
        self.charge_capacity.push(row.charge_capacity);
        self.discharge_capacity.push(row.discharge_capacity);
        push_optional(&mut self.internal_resistance, len, row.internal_resistance);
    }

    /// Sample at `index`
    pub fn row(&self, index: usize) -> Option<RawRow> {
        if index >= self.len() {
            return None;
        }
        Some(RawRow {
            data_point: self.data_point[index],
            test_time: self.test_time[index],
            step_time: self.step_time[index],
            date_time: self.date_time.as_ref().map(|v| v[index]),
            step_index: self.step_index[index],
            cycle_index: self.cycle_index[index],
            sub_step_index: self.sub_step_index[index],
            current: self.current[index],
            voltage: self.voltage[index],
            charge_capacity: self.charge_capacity[index],
            discharge_capacity: self.discharge_capacity[index],
            internal_resistance: self.internal_resistance.as_ref().map(|v| v[index]),
        })
    }

    /// Check that every column has the same length
    pub fn validate(&self) -> Result<(), DatasetError> {
        let expected = self.len();
        let lengths = [
            ("test_time", self.test_time.len()),
            ("step_time", self.step_time.len()),
            ("step_index", self.step_index.len()),
            ("cycle_index", self.cycle_index.len()),
            ("sub_step_index", self.sub_step_index.len()),
            ("current", self.current.len()),
            ("voltage", self.voltage.len()),
            ("charge_capacity", self.charge_capacity.len()),
            ("discharge_capacity", self.discharge_capacity.len()),
            (
                "date_time",
                self.date_time.as_ref().map_or(expected, |v| v.len()),
            ),
            (
                "internal_resistance",
                self.internal_resistance.as_ref().map_or(expected, |v| v.len()),
            ),
        ];
        for (column, actual) in lengths {
            if actual != expected {
                return Err(DatasetError::LengthMismatch {
                    column: column.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Largest data point
    pub fn max_data_point(&self) -> Option<i64> {
        self.data_point.iter().copied().max()
    }

    /// Largest cycle number
    pub fn max_cycle(&self) -> Option<i32> {
        self.cycle_index.iter().copied().max()
    }

    /// Sorted distinct cycle numbers
    pub fn cycles(&self) -> Vec<i32> {
        let mut cycles = self.cycle_index.clone();
        cycles.sort_unstable();
        cycles.dedup();
        cycles
    }

    /// Row indices grouped by (cycle, step)
    pub fn step_row_index(&self) -> BTreeMap<(i32, i32), Vec<usize>> {
        let mut index: BTreeMap<(i32, i32), Vec<usize>> = BTreeMap::new();
        for (i, (&cycle, &step)) in self.cycle_index.iter().zip(&self.step_index).enumerate() {
            index.entry((cycle, step)).or_default().push(i);
        }
        index
    }

    /// Index of the row with the largest data point in each cycle
    pub fn last_row_per_cycle(&self) -> BTreeMap<i32, usize> {
        let mut last: BTreeMap<i32, usize> = BTreeMap::new();
        for (i, &cycle) in self.cycle_index.iter().enumerate() {
            let entry = last.entry(cycle).or_insert(i);
            if self.data_point[i] >= self.data_point[*entry] {
                *entry = i;
            }
        }
        last
    }

    /// New table holding the given rows in the given order
    pub fn select(&self, indices: &[usize]) -> RawTable {
        let pick_f64 = |v: &Vec<f64>| indices.iter().map(|&i| v[i]).collect::<Vec<_>>();
        let pick_i32 = |v: &Vec<i32>| indices.iter().map(|&i| v[i]).collect::<Vec<_>>();
        RawTable {
            data_point: indices.iter().map(|&i| self.data_point[i]).collect(),
            test_time: pick_f64(&self.test_time),
            step_time: pick_f64(&self.step_time),
            date_time: self.date_time.as_ref().map(pick_f64),
            step_index: pick_i32(&self.step_index),
            cycle_index: pick_i32(&self.cycle_index),
            sub_step_index: pick_i32(&self.sub_step_index),
            current: pick_f64(&self.current),
            voltage: pick_f64(&self.voltage),
            charge_capacity: pick_f64(&self.charge_capacity),
            discharge_capacity: pick_f64(&self.discharge_capacity),
            internal_resistance: self.internal_resistance.as_ref().map(pick_f64),
        }
    }

    /// Reorder rows by increasing data point
    pub fn sort_by_data_point(&mut self) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by_key(|&i| self.data_point[i]);
        if order.iter().enumerate().all(|(pos, &i)| pos == i) {
            return;
        }
        *self = self.select(&order);
    }

    /// Append all rows of `other` after the rows of `self`
    pub fn append(&mut self, other: RawTable) {
        let left_len = self.len();
        let right_len = other.len();
        self.data_point.extend(other.data_point);
        self.test_time.extend(other.test_time);
        self.step_time.extend(other.step_time);
        append_optional(&mut self.date_time, left_len, other.date_time, right_len);
        self.step_index.extend(other.step_index);
        self.cycle_index.extend(other.cycle_index);
        self.sub_step_index.extend(other.sub_step_index);
        self.current.extend(other.current);
        self.voltage.extend(other.voltage);
        self.charge_capacity.extend(other.charge_capacity);
        self.discharge_capacity.extend(other.discharge_capacity);
        append_optional(
            &mut self.internal_resistance,
            left_len,
            other.internal_resistance,
            right_len,
        );
    }
}
