use std::io::Write;

use log::{debug, info};

use super::{format_float, ExportError, ExportOptions};
use crate::curves::{get_cap, CurveError, CurveMethod, CurveOptions, CurveSeries};
use crate::dataset::Dataset;

/// Concatenated curve of every exported cycle.
///
/// Each cycle is laid out on its own starting at `options.shift`. When
/// `options.shifted` is set the method is back-and-forth and every cycle
/// starts where the previous one ended.
pub fn cycle_curves(
    dataset: &Dataset,
    options: &ExportOptions,
    curve_options: &CurveOptions,
) -> Result<Vec<(i32, CurveSeries)>, ExportError> {
    let mut cycles = dataset.cycle_numbers();
    if let Some(last) = options.last_cycle {
        cycles.retain(|&c| c <= last);
        debug!("Only processing up to cycle {}", last);
    }

    let mut curve_options = curve_options.clone();
    curve_options.method = if options.shifted {
        CurveMethod::BackAndForth
    } else {
        options.method
    };
    curve_options.shift = if options.shifted { 0.0 } else { options.shift };

    let mut out = Vec::with_capacity(cycles.len());
    for cycle in cycles {
        let curves = match get_cap(dataset, Some(&[cycle]), &curve_options) {
            Ok(curves) => curves,
            Err(CurveError::NoDataForStep { .. }) => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        match curves.first() {
            Some(curve) => {
                let series = curve.concatenated();
                if options.shifted {
                    if let Some(&last) = series.capacity.last() {
                        curve_options.shift = last;
                    }
                }
                debug!("Extracted cycle {}", cycle);
                out.push((cycle, series));
            }
            None => info!("Could not extract cycle {}", cycle),
        }
    }
    Ok(out)
}

/// Write x/y column pairs, one pair per cycle, padded to the longest cycle
pub fn write_cycles<W: Write>(
    curves: &[(i32, CurveSeries)],
    writer: &mut csv::Writer<W>,
) -> Result<(), ExportError> {
    let mut header = Vec::with_capacity(curves.len() * 2);
    for (cycle, _) in curves {
        header.push(format!("cap cycle_no {}", cycle));
        header.push(format!("voltage cycle_no {}", cycle));
    }
    writer.write_record(&header)?;

    let rows = curves.iter().map(|(_, s)| s.len()).max().unwrap_or(0);
    for i in 0..rows {
        let mut record = Vec::with_capacity(header.len());
        for (_, series) in curves {
            match (series.capacity.get(i), series.voltage.get(i)) {
                (Some(&c), Some(&v)) => {
                    record.push(format_float(c));
                    record.push(format_float(v));
                }
                _ => {
                    record.push(String::new());
                    record.push(String::new());
                }
            }
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
