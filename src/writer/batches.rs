//! Conversion of the in-memory tables into Arrow record batches.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, Int64Array, StringArray, UInt64Array};
use arrow::record_batch::RecordBatch;

use super::WriterError;
use crate::dataset::RawTable;
use crate::metadata::FileId;
use crate::schema::{
    create_fid_schema, create_raw_schema_arc, create_step_schema, create_summary_schema,
};
use crate::steps::{StepRecord, StepTable};
use crate::summary::SummaryTable;

fn f64_array(values: &[f64]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

fn i32_array(values: &[i32]) -> ArrayRef {
    Arc::new(Int32Array::from(values.to_vec()))
}

/// Raw table as one record batch
pub fn raw_to_batch(raw: &RawTable) -> Result<RecordBatch, WriterError> {
    let schema = create_raw_schema_arc(raw.date_time.is_some(), raw.internal_resistance.is_some());

    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(raw.data_point.clone())),
        f64_array(&raw.test_time),
        f64_array(&raw.step_time),
    ];
    if let Some(date_time) = &raw.date_time {
        arrays.push(f64_array(date_time));
    }
    arrays.extend([
        i32_array(&raw.step_index),
        i32_array(&raw.cycle_index),
        i32_array(&raw.sub_step_index),
        f64_array(&raw.current),
        f64_array(&raw.voltage),
        f64_array(&raw.charge_capacity),
        f64_array(&raw.discharge_capacity),
    ]);
    if let Some(ir) = &raw.internal_resistance {
        arrays.push(f64_array(ir));
    }

    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Statistics of every measure in schema order
fn measure_arrays(record: &StepRecord, with_ir: bool) -> Vec<[f64; 7]> {
    let mut out = vec![
        record.point.to_array(),
        record.step_time.to_array(),
        record.current.to_array(),
        record.voltage.to_array(),
        record.charge.to_array(),
        record.discharge.to_array(),
    ];
    if with_ir {
        out.push(record.ir.as_ref().map_or([f64::NAN; 7], |ir| ir.to_array()));
    }
    out
}

/// Step table as one record batch, unset types written as `""`
pub fn steps_to_batch(steps: &StepTable) -> Result<RecordBatch, WriterError> {
    let with_ir = steps.has_ir();
    let schema = Arc::new(create_step_schema(with_ir));
    let records = &steps.records;

    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.cycle))),
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.step))),
        Arc::new(Int32Array::from_iter_values(records.iter().map(|r| r.sub_step))),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.type_label()),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.info.clone()).collect::<Vec<_>>(),
        )),
    ];

    let rows: Vec<Vec<[f64; 7]>> = records.iter().map(|r| measure_arrays(r, with_ir)).collect();
    let measures = if with_ir { 7 } else { 6 };
    for m in 0..measures {
        for k in 0..7 {
            arrays.push(Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|row| row[m][k]),
            )));
        }
    }

    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Summary as one record batch
pub fn summary_to_batch(summary: &SummaryTable) -> Result<RecordBatch, WriterError> {
    let names = summary.column_names();
    let schema = Arc::new(create_summary_schema(summary.date_time_txt.is_some(), &names));

    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(names.len() + 4);
    if let Some(texts) = &summary.date_time_txt {
        arrays.push(Arc::new(StringArray::from_iter_values(texts.iter())));
    }
    arrays.push(f64_array(&summary.test_time));
    arrays.push(Arc::new(Int64Array::from(summary.data_point.clone())));
    arrays.push(i32_array(&summary.cycle_index));
    for column in summary.columns() {
        arrays.push(f64_array(&column.values));
    }

    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Raw file provenance as one record batch
pub fn fid_to_batch(files: &[FileId], lengths: &[usize]) -> Result<RecordBatch, WriterError> {
    let schema = Arc::new(create_fid_schema());
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(files.iter().map(|f| f.name.as_str()))),
        Arc::new(StringArray::from_iter_values(
            files.iter().map(|f| f.full_name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            files.iter().map(|f| f.location.as_str()),
        )),
        Arc::new(UInt64Array::from_iter_values(files.iter().map(|f| f.size))),
        Arc::new(Float64Array::from_iter_values(
            files.iter().map(|f| f.last_modified),
        )),
        Arc::new(Float64Array::from_iter_values(
            files.iter().map(|f| f.last_accessed),
        )),
        Arc::new(Float64Array::from_iter_values(
            files.iter().map(|f| f.last_info_changed),
        )),
        Arc::new(UInt64Array::from_iter_values(
            (0..files.len()).map(|i| lengths.get(i).copied().unwrap_or(0) as u64),
        )),
    ];

    Ok(RecordBatch::try_new(schema, arrays)?)
}
