//! # cellpeak CSV Export
//!
//! Writes the tables of a dataset as delimited text, one file per table:
//!
//! | File | Content |
//! |---|---|
//! | `{base}_normal.csv` | raw table |
//! | `{base}_stats.csv` | summary |
//! | `{base}_steps.csv` | step table, when made |
//! | `{base}_cycles.csv` | capacity curves as x/y column pairs per cycle |
//!
//! `{base}` is the stem of the file the dataset was loaded from (or its
//! name), with `_merged_NNN` appended for merged datasets. NaN is written
//! as an empty field.

mod cycles;
mod error;
mod tables;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::info;

pub use cycles::{cycle_curves, write_cycles};
pub use error::ExportError;
pub use tables::{write_raw, write_steps, write_summary};

use crate::curves::{CurveMethod, CurveOptions};
use crate::dataset::Dataset;

/// Which files to write and how to lay out the curves
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Field delimiter
    pub sep: u8,
    /// Write `_normal.csv`
    pub raw: bool,
    /// Write `_stats.csv`
    pub summary: bool,
    /// Write `_steps.csv` when the step table is made
    pub steps: bool,
    /// Write `_cycles.csv`
    pub cycles: bool,
    /// Continue every cycle where the previous one ended
    pub shifted: bool,
    /// Curve layout, ignored when `shifted`
    pub method: CurveMethod,
    /// Start of the capacity axis, ignored when `shifted`
    pub shift: f64,
    /// Last cycle to export
    pub last_cycle: Option<i32>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sep: b',',
            raw: true,
            summary: true,
            steps: true,
            cycles: false,
            shifted: false,
            method: CurveMethod::BackAndForth,
            shift: 0.0,
            last_cycle: None,
        }
    }
}

pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Base name of the exported files
pub fn export_base_name(dataset: &Dataset) -> String {
    let source = dataset
        .raw_data_files
        .first()
        .map(|fid| fid.full_name.clone())
        .or_else(|| dataset.info.loaded_from.clone());
    let mut base = source
        .as_deref()
        .and_then(|s| Path::new(s).file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| dataset.info.name.clone());
    if dataset.merged {
        base.push_str(&format!("_merged_{:03}", dataset.raw_data_files.len()));
    }
    base
}

fn csv_writer(path: &Path, sep: u8) -> Result<csv::Writer<BufWriter<File>>, ExportError> {
    let file = File::create(path)?;
    Ok(csv::WriterBuilder::new()
        .delimiter(sep)
        .from_writer(BufWriter::new(file)))
}

/// Export a dataset into `out_dir` and return the written paths
pub fn to_csv(
    dataset: &Dataset,
    out_dir: &Path,
    options: &ExportOptions,
    curve_options: &CurveOptions,
) -> Result<Vec<PathBuf>, ExportError> {
    let raw = dataset.raw().map_err(|_| ExportError::EmptyDataset)?;
    std::fs::create_dir_all(out_dir)?;
    let base = export_base_name(dataset);
    let mut written = Vec::new();

    if options.raw {
        let path = out_dir.join(format!("{}_normal.csv", base));
        write_raw(raw, &mut csv_writer(&path, options.sep)?)?;
        written.push(path);
    }
    if options.summary {
        match &dataset.summary {
            Some(summary) => {
                let path = out_dir.join(format!("{}_stats.csv", base));
                write_summary(summary, &mut csv_writer(&path, options.sep)?)?;
                written.push(path);
            }
            None => info!("Summary of '{}' not made, not exported", dataset.info.name),
        }
    }
    if options.steps {
        if let Some(steps) = &dataset.steps {
            let path = out_dir.join(format!("{}_steps.csv", base));
            write_steps(steps, &mut csv_writer(&path, options.sep)?)?;
            written.push(path);
        }
    }
    if options.cycles {
        let curves = cycle_curves(dataset, options, curve_options)?;
        let path = out_dir.join(format!("{}_cycles.csv", base));
        write_cycles(&curves, &mut csv_writer(&path, options.sep)?)?;
        written.push(path);
    }

    for path in &written {
        info!("Exported {}", path.display());
    }
    Ok(written)
}
