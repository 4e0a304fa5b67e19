//! Decoding of record batches back into the in-memory tables.

use arrow::array::Array;
use arrow::record_batch::RecordBatch;

use super::utils::{
    f64_values, get_float64_column, get_int32_column, get_int64_column,
    get_optional_float64_column, get_optional_string, get_optional_string_column,
    get_string_column, get_uint64_column,
};
use super::ReaderError;
use crate::dataset::RawTable;
use crate::metadata::FileId;
use crate::schema::{columns, step_columns, summary_columns, validate_raw_schema};
use crate::steps::{ColumnStats, StepRecord, StepTable, StepType};
use crate::summary::SummaryTable;

fn extend_f64(target: &mut Vec<f64>, batch: &RecordBatch, name: &str) -> Result<(), ReaderError> {
    target.extend(f64_values(get_float64_column(batch, name)?));
    Ok(())
}

fn extend_i32(target: &mut Vec<i32>, batch: &RecordBatch, name: &str) -> Result<(), ReaderError> {
    target.extend(get_int32_column(batch, name)?.values().iter().copied());
    Ok(())
}

/// Raw table from its record batches
pub fn decode_raw(batches: &[RecordBatch]) -> Result<RawTable, ReaderError> {
    if let Some(batch) = batches.first() {
        validate_raw_schema(batch.schema().as_ref())?;
    }
    let mut raw = RawTable::new();
    let with_date_time = batches
        .first()
        .map_or(false, |b| b.column_by_name(columns::DATE_TIME).is_some());
    let with_ir = batches
        .first()
        .map_or(false, |b| b.column_by_name(columns::INTERNAL_RESISTANCE).is_some());
    if with_date_time {
        raw.date_time = Some(Vec::new());
    }
    if with_ir {
        raw.internal_resistance = Some(Vec::new());
    }

    for batch in batches {
        raw.data_point.extend(
            get_int64_column(batch, columns::DATA_POINT)?
                .values()
                .iter()
                .copied(),
        );
        extend_f64(&mut raw.test_time, batch, columns::TEST_TIME)?;
        extend_f64(&mut raw.step_time, batch, columns::STEP_TIME)?;
        if let Some(date_time) = raw.date_time.as_mut() {
            extend_f64(date_time, batch, columns::DATE_TIME)?;
        }
        extend_i32(&mut raw.step_index, batch, columns::STEP_INDEX)?;
        extend_i32(&mut raw.cycle_index, batch, columns::CYCLE_INDEX)?;
        extend_i32(&mut raw.sub_step_index, batch, columns::SUB_STEP_INDEX)?;
        extend_f64(&mut raw.current, batch, columns::CURRENT)?;
        extend_f64(&mut raw.voltage, batch, columns::VOLTAGE)?;
        extend_f64(&mut raw.charge_capacity, batch, columns::CHARGE_CAPACITY)?;
        extend_f64(&mut raw.discharge_capacity, batch, columns::DISCHARGE_CAPACITY)?;
        if let Some(ir) = raw.internal_resistance.as_mut() {
            extend_f64(ir, batch, columns::INTERNAL_RESISTANCE)?;
        }
    }

    raw.validate()
        .map_err(|e| ReaderError::InvalidFormat(e.to_string()))?;
    Ok(raw)
}

fn stats_at(batch: &RecordBatch, measure: &str, row: usize) -> Result<ColumnStats, ReaderError> {
    let mut values = [f64::NAN; 7];
    for (k, statistic) in step_columns::STATISTICS.iter().enumerate() {
        let array = get_float64_column(batch, &step_columns::flattened(measure, statistic))?;
        if !array.is_null(row) {
            values[k] = array.value(row);
        }
    }
    Ok(ColumnStats::from_array(values))
}

/// Step table from its record batches
pub fn decode_steps(batches: &[RecordBatch]) -> Result<StepTable, ReaderError> {
    let mut records = Vec::new();
    let ir_column = step_columns::flattened(step_columns::IR, step_columns::STAT_AVR);

    for batch in batches {
        let cycles = get_int32_column(batch, step_columns::CYCLE)?;
        let steps = get_int32_column(batch, step_columns::STEP)?;
        let sub_steps = get_int32_column(batch, step_columns::SUB_STEP)?;
        let types = get_string_column(batch, step_columns::TYPE)?;
        let infos = get_optional_string_column(batch, step_columns::INFO);
        let with_ir = batch.column_by_name(&ir_column).is_some();

        for row in 0..batch.num_rows() {
            let label = types.value(row);
            let step_type = if label.is_empty() {
                None
            } else {
                Some(label.parse::<StepType>().map_err(|_| {
                    ReaderError::InvalidFormat(format!("unknown step type '{}'", label))
                })?)
            };
            records.push(StepRecord {
                cycle: cycles.value(row),
                step: steps.value(row),
                sub_step: sub_steps.value(row),
                step_type,
                info: infos.and_then(|a| get_optional_string(a, row)),
                point: stats_at(batch, step_columns::POINT, row)?,
                step_time: stats_at(batch, step_columns::STEP_TIME, row)?,
                current: stats_at(batch, step_columns::CURRENT, row)?,
                voltage: stats_at(batch, step_columns::VOLTAGE, row)?,
                charge: stats_at(batch, step_columns::CHARGE, row)?,
                discharge: stats_at(batch, step_columns::DISCHARGE, row)?,
                ir: if with_ir {
                    Some(stats_at(batch, step_columns::IR, row)?)
                } else {
                    None
                },
            });
        }
    }
    Ok(StepTable { records })
}

const SUMMARY_ID_COLUMNS: [&str; 4] = [
    summary_columns::DATE_TIME_TXT,
    summary_columns::TEST_TIME,
    summary_columns::DATA_POINT,
    summary_columns::CYCLE_INDEX,
];

/// Summary from its record batches
pub fn decode_summary(batches: &[RecordBatch]) -> Result<SummaryTable, ReaderError> {
    let mut summary = SummaryTable::default();
    let mut metrics: Vec<(String, Vec<f64>)> = Vec::new();
    let mut texts: Option<Vec<String>> = None;

    for batch in batches {
        summary.cycle_index.extend(
            get_int32_column(batch, summary_columns::CYCLE_INDEX)?
                .values()
                .iter()
                .copied(),
        );
        summary.data_point.extend(
            get_int64_column(batch, summary_columns::DATA_POINT)?
                .values()
                .iter()
                .copied(),
        );
        extend_f64(&mut summary.test_time, batch, summary_columns::TEST_TIME)?;
        if let Some(array) = get_optional_string_column(batch, summary_columns::DATE_TIME_TXT) {
            let target = texts.get_or_insert_with(Vec::new);
            target.extend(
                (0..array.len()).map(|i| get_optional_string(array, i).unwrap_or_default()),
            );
        }

        let schema = batch.schema();
        for field in schema.fields() {
            let name = field.name();
            if SUMMARY_ID_COLUMNS.contains(&name.as_str()) {
                continue;
            }
            let values = get_float64_column(batch, name)?;
            match metrics.iter_mut().find(|(n, _)| n.as_str() == name.as_str()) {
                Some((_, column)) => column.extend(f64_values(values)),
                None => metrics.push((name.clone(), f64_values(values).collect())),
            }
        }
    }

    summary.date_time_txt = texts;
    for (name, values) in metrics {
        summary
            .insert(&name, values)
            .map_err(|e| ReaderError::InvalidFormat(e.to_string()))?;
    }
    Ok(summary)
}

/// Raw file ids and their row counts from the provenance table
pub fn decode_file_ids(batches: &[RecordBatch]) -> Result<(Vec<FileId>, Vec<usize>), ReaderError> {
    let mut files = Vec::new();
    let mut lengths = Vec::new();

    for batch in batches {
        let names = get_string_column(batch, "name")?;
        let full_names = get_string_column(batch, "full_name")?;
        let locations = get_string_column(batch, "location")?;
        let sizes = get_uint64_column(batch, "size")?;
        let modified = get_float64_column(batch, "last_modified")?;
        let accessed = get_float64_column(batch, "last_accessed")?;
        let changed = get_optional_float64_column(batch, "last_info_changed");
        let files_length = get_uint64_column(batch, "files_length")?;

        for row in 0..batch.num_rows() {
            files.push(FileId {
                name: names.value(row).to_string(),
                full_name: full_names.value(row).to_string(),
                location: locations.value(row).to_string(),
                size: sizes.value(row),
                last_modified: modified.value(row),
                last_accessed: accessed.value(row),
                last_info_changed: changed.map_or(0.0, |a| a.value(row)),
            });
            lengths.push(files_length.value(row) as usize);
        }
    }
    Ok((files, lengths))
}
