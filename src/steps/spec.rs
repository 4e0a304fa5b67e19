//! User supplied step type definitions.
//!
//! A specification is a CSV table with the columns `step` and `type`, an
//! optional `info` column and, in the long form, a `cycle` column:
//!
//! ```text
//! cycle,step,type,info
//! 1,1,rest,formation
//! 1,2,discharge,
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use super::{StepError, StepType};

/// One row of a step specification
#[derive(Debug, Clone, PartialEq)]
pub struct StepSpecEntry {
    /// Cycle the entry applies to, `None` in the short form
    pub cycle: Option<i32>,
    /// Step number
    pub step: i32,
    /// Assigned type
    pub step_type: StepType,
    /// Free-text information
    pub info: Option<String>,
}

/// Step type definitions overriding the heuristic classifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepSpecification {
    entries: Vec<StepSpecEntry>,
    short: bool,
}

fn column_position(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn parse_int(value: &str, column: &str, line: usize) -> Result<i32, StepError> {
    let trimmed = value.trim();
    trimmed
        .parse::<i32>()
        .or_else(|_| trimmed.parse::<f64>().map(|v| v as i32))
        .map_err(|_| {
            StepError::MalformedSpecification(format!(
                "line {}: '{}' is not a valid {}",
                line, trimmed, column
            ))
        })
}

impl StepSpecification {
    /// Build a specification from entries.
    ///
    /// Short form entries apply to a step in every cycle.
    pub fn new(entries: Vec<StepSpecEntry>, short: bool) -> Self {
        Self { entries, short }
    }

    /// Load a specification from a CSV file
    pub fn from_path<P: AsRef<Path>>(path: P, short: bool) -> Result<Self, StepError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file, short)
    }

    /// Parse a specification from CSV text
    pub fn from_reader<R: Read>(reader: R, short: bool) -> Result<Self, StepError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let step_col = column_position(&headers, "step").ok_or_else(|| {
            StepError::MalformedSpecification("missing column 'step'".to_string())
        })?;
        let type_col = column_position(&headers, "type").ok_or_else(|| {
            StepError::MalformedSpecification("missing column 'type'".to_string())
        })?;
        let info_col = column_position(&headers, "info");
        let cycle_col = if short {
            None
        } else {
            Some(column_position(&headers, "cycle").ok_or_else(|| {
                StepError::MalformedSpecification("missing column 'cycle'".to_string())
            })?)
        };

        let mut entries = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = i + 2;
            let field = |col: usize| record.get(col).unwrap_or("");

            let step = parse_int(field(step_col), "step", line)?;
            let cycle = match cycle_col {
                Some(col) => Some(parse_int(field(col), "cycle", line)?),
                None => None,
            };
            let step_type = field(type_col).parse::<StepType>().map_err(|_| {
                StepError::MalformedSpecification(format!(
                    "line {}: unknown step type '{}'",
                    line,
                    field(type_col)
                ))
            })?;
            let info = info_col
                .map(field)
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            entries.push(StepSpecEntry {
                cycle,
                step,
                step_type,
                info,
            });
        }

        debug!(
            "Loaded step specification with {} entries ({} form)",
            entries.len(),
            if short { "short" } else { "long" }
        );
        Ok(Self { entries, short })
    }

    /// Whether entries are keyed by step only
    pub fn is_short(&self) -> bool {
        self.short
    }

    /// All entries in file order
    pub fn entries(&self) -> &[StepSpecEntry] {
        &self.entries
    }

    /// Entry for a step. Later entries override earlier ones.
    pub fn lookup(&self, cycle: i32, step: i32) -> Option<&StepSpecEntry> {
        self.entries.iter().rev().find(|entry| {
            entry.step == step && (self.short || entry.cycle == Some(cycle))
        })
    }
}
