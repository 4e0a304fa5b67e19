use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, info, warn};

use super::{Loader, LoaderError};
use crate::dataset::{Dataset, RawRow, RawTable};
use crate::metadata::{
    datetime_to_xldate, xldate_to_datetime, DatasetInfo, FileId, RawLimits, RawUnits,
};
use crate::schema::columns;

const DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M:%S%.f",
];

/// Canonical column name of an export header.
///
/// Units in parentheses are dropped, the rest is lower-cased with spaces
/// and dashes turned into underscores, so `Charge_Capacity(Ah)` becomes
/// `charge_capacity`. Arbin's `DateTime` maps to `date_time`.
pub fn canonical_column_name(header: &str) -> String {
    let without_unit = match header.find('(') {
        Some(pos) => &header[..pos],
        None => header,
    };
    let name: String = without_unit
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect();
    match name.as_str() {
        "datetime" => columns::DATE_TIME.to_string(),
        "step_index" | "step" => columns::STEP_INDEX.to_string(),
        "cycle_index" | "cycle" => columns::CYCLE_INDEX.to_string(),
        _ => name,
    }
}

/// Loader for delimited text exports
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
    raw_units: RawUnits,
    raw_limits: RawLimits,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            raw_units: RawUnits::arbin(),
            raw_limits: RawLimits::arbin(),
        }
    }
}

struct Columns {
    positions: HashMap<String, usize>,
}

impl Columns {
    fn required(&self, name: &str) -> Result<usize, LoaderError> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| LoaderError::MissingColumn(name.to_string()))
    }

    fn optional(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

fn field<'a>(record: &'a csv::StringRecord, col: usize) -> &'a str {
    record.get(col).unwrap_or("").trim()
}

fn invalid(line: usize, column: &str, value: &str) -> LoaderError {
    LoaderError::InvalidValue {
        line,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_float(value: &str, column: &str, line: usize) -> Result<f64, LoaderError> {
    if value.is_empty() {
        return Ok(f64::NAN);
    }
    value
        .parse::<f64>()
        .map_err(|_| invalid(line, column, value))
}

fn parse_int(value: &str, column: &str, line: usize) -> Result<i64, LoaderError> {
    if let Ok(parsed) = value.parse::<i64>() {
        return Ok(parsed);
    }
    // integral floats such as "3.0" are accepted, NaN and overflow are not
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(invalid(line, column, value)),
    }
}

fn parse_index(value: &str, column: &str, line: usize) -> Result<i32, LoaderError> {
    let parsed = parse_int(value, column, line)?;
    i32::try_from(parsed).map_err(|_| invalid(line, column, value))
}

fn parse_date_time(value: &str, line: usize) -> Result<Option<f64>, LoaderError> {
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(days) = value.parse::<f64>() {
        return Ok(Some(days));
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| Some(datetime_to_xldate(dt)))
        .ok_or_else(|| invalid(line, columns::DATE_TIME, value))
}

impl CsvLoader {
    /// Loader for comma separated files with Arbin units and limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use other unit fractions
    pub fn with_units(mut self, raw_units: RawUnits) -> Self {
        self.raw_units = raw_units;
        self
    }

    /// Use other classification limits
    pub fn with_limits(mut self, raw_limits: RawLimits) -> Self {
        self.raw_limits = raw_limits;
        self
    }

    /// Parse a raw table from delimited text
    pub fn read_table<R: Read>(&self, reader: R) -> Result<RawTable, LoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let positions = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| (canonical_column_name(h), i))
            .collect();
        let cols = Columns { positions };

        let data_point = cols.required(columns::DATA_POINT)?;
        let test_time = cols.required(columns::TEST_TIME)?;
        let step_time = cols.required(columns::STEP_TIME)?;
        let step_index = cols.required(columns::STEP_INDEX)?;
        let cycle_index = cols.required(columns::CYCLE_INDEX)?;
        let current = cols.required(columns::CURRENT)?;
        let voltage = cols.required(columns::VOLTAGE)?;
        let charge = cols.required(columns::CHARGE_CAPACITY)?;
        let discharge = cols.required(columns::DISCHARGE_CAPACITY)?;
        let sub_step = cols.optional(columns::SUB_STEP_INDEX);
        let date_time = cols.optional(columns::DATE_TIME);
        let ir = cols.optional(columns::INTERNAL_RESISTANCE);
        if sub_step.is_none() {
            debug!("No sub step column, using 1 for every row");
        }

        let mut table = RawTable::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = i + 2;
            let float = |col: usize, name: &str| parse_float(field(&record, col), name, line);
            let int = |col: usize, name: &str| parse_int(field(&record, col), name, line);
            let index = |col: usize, name: &str| parse_index(field(&record, col), name, line);

            table.push(RawRow {
                data_point: int(data_point, columns::DATA_POINT)?,
                test_time: float(test_time, columns::TEST_TIME)?,
                step_time: float(step_time, columns::STEP_TIME)?,
                date_time: match date_time {
                    Some(col) => parse_date_time(field(&record, col), line)?,
                    None => None,
                },
                step_index: index(step_index, columns::STEP_INDEX)?,
                cycle_index: index(cycle_index, columns::CYCLE_INDEX)?,
                sub_step_index: match sub_step {
                    Some(col) => index(col, columns::SUB_STEP_INDEX)?,
                    None => 1,
                },
                current: float(current, columns::CURRENT)?,
                voltage: float(voltage, columns::VOLTAGE)?,
                charge_capacity: float(charge, columns::CHARGE_CAPACITY)?,
                discharge_capacity: float(discharge, columns::DISCHARGE_CAPACITY)?,
                internal_resistance: match ir {
                    Some(col) => Some(float(col, columns::INTERNAL_RESISTANCE)?),
                    None => None,
                },
            });
        }
        table.validate()?;
        Ok(table)
    }
}

impl Loader for CsvLoader {
    fn name(&self) -> &str {
        "csv"
    }

    fn raw_units(&self) -> RawUnits {
        self.raw_units
    }

    fn raw_limits(&self) -> RawLimits {
        self.raw_limits
    }

    fn load(&self, path: &Path) -> Result<Vec<Dataset>, LoaderError> {
        info!("Loading {}", path.display());
        let fid = FileId::from_path(path)?;
        let file = File::open(path)?;
        let raw = self.read_table(BufReader::new(file))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| fid.name.clone());
        let mut info = DatasetInfo::new(name);
        info.loaded_from = Some(path.display().to_string());
        info.start_datetime = raw
            .date_time
            .as_ref()
            .and_then(|dt| dt.iter().copied().find(|v| v.is_finite()))
            .and_then(xldate_to_datetime);
        if info.start_datetime.is_none() {
            warn!("{} has no date column, start time unknown", path.display());
        }

        let rows = raw.len();
        if rows == 0 {
            warn!("{} holds no data rows", path.display());
        }
        let mut dataset = Dataset::new(info);
        if rows > 0 {
            dataset.raw = Some(raw);
        }
        dataset.raw_units = self.raw_units;
        dataset.raw_limits = self.raw_limits;
        dataset.raw_data_files.push(fid);
        dataset.raw_data_files_length.push(rows);
        debug!("Loaded {} rows from {}", rows, path.display());
        Ok(vec![dataset])
    }
}
