use std::io::Write;

use super::{format_float, ExportError};
use crate::dataset::RawTable;
use crate::schema::{columns, step_columns, summary_columns};
use crate::steps::StepTable;
use crate::summary::SummaryTable;

/// Write the raw table, optional columns only when present
pub fn write_raw<W: Write>(raw: &RawTable, writer: &mut csv::Writer<W>) -> Result<(), ExportError> {
    let mut header = vec![columns::DATA_POINT, columns::TEST_TIME, columns::STEP_TIME];
    if raw.date_time.is_some() {
        header.push(columns::DATE_TIME);
    }
    header.extend([
        columns::STEP_INDEX,
        columns::CYCLE_INDEX,
        columns::SUB_STEP_INDEX,
        columns::CURRENT,
        columns::VOLTAGE,
        columns::CHARGE_CAPACITY,
        columns::DISCHARGE_CAPACITY,
    ]);
    if raw.internal_resistance.is_some() {
        header.push(columns::INTERNAL_RESISTANCE);
    }
    writer.write_record(&header)?;

    for i in 0..raw.len() {
        let mut record = vec![
            raw.data_point[i].to_string(),
            format_float(raw.test_time[i]),
            format_float(raw.step_time[i]),
        ];
        if let Some(date_time) = &raw.date_time {
            record.push(format_float(date_time[i]));
        }
        record.extend([
            raw.step_index[i].to_string(),
            raw.cycle_index[i].to_string(),
            raw.sub_step_index[i].to_string(),
            format_float(raw.current[i]),
            format_float(raw.voltage[i]),
            format_float(raw.charge_capacity[i]),
            format_float(raw.discharge_capacity[i]),
        ]);
        if let Some(ir) = &raw.internal_resistance {
            record.push(format_float(ir[i]));
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the summary, identification columns first
pub fn write_summary<W: Write>(
    summary: &SummaryTable,
    writer: &mut csv::Writer<W>,
) -> Result<(), ExportError> {
    let mut header = Vec::new();
    if summary.date_time_txt.is_some() {
        header.push(summary_columns::DATE_TIME_TXT);
    }
    header.extend([
        summary_columns::TEST_TIME,
        summary_columns::DATA_POINT,
        summary_columns::CYCLE_INDEX,
    ]);
    header.extend(summary.column_names());
    writer.write_record(&header)?;

    for i in 0..summary.len() {
        let mut record = Vec::with_capacity(header.len());
        if let Some(dates) = &summary.date_time_txt {
            record.push(dates[i].clone());
        }
        record.push(format_float(summary.test_time[i]));
        record.push(summary.data_point[i].to_string());
        record.push(summary.cycle_index[i].to_string());
        record.extend(summary.columns().iter().map(|c| format_float(c.values[i])));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the step table with flattened statistics columns
pub fn write_steps<W: Write>(steps: &StepTable, writer: &mut csv::Writer<W>) -> Result<(), ExportError> {
    let with_ir = steps.has_ir();
    let mut measures: Vec<&str> = step_columns::MEASURES.to_vec();
    if with_ir {
        measures.push(step_columns::IR);
    }

    let mut header: Vec<String> = [
        step_columns::CYCLE,
        step_columns::STEP,
        step_columns::SUB_STEP,
        step_columns::TYPE,
        step_columns::INFO,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    for measure in &measures {
        for statistic in step_columns::STATISTICS {
            header.push(step_columns::flattened(measure, statistic));
        }
    }
    writer.write_record(&header)?;

    for record in &steps.records {
        let mut row = vec![
            record.cycle.to_string(),
            record.step.to_string(),
            record.sub_step.to_string(),
            record.type_label().to_string(),
            record.info.clone().unwrap_or_default(),
        ];
        let mut stats = vec![
            record.point,
            record.step_time,
            record.current,
            record.voltage,
            record.charge,
            record.discharge,
        ];
        if with_ir {
            stats.push(record.ir.unwrap_or_default());
        }
        for stat in stats {
            row.extend(stat.to_array().iter().map(|&v| format_float(v)));
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
