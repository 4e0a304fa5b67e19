use arrow::array::{Array, Float64Array, Int32Array, Int64Array, StringArray, UInt64Array};
use arrow::record_batch::RecordBatch;

use super::ReaderError;

/// A column downcast to its concrete array type, `None` when absent
fn typed_column<'a, T: Array + 'static>(
    batch: &'a RecordBatch,
    name: &str,
    type_name: &str,
) -> Result<Option<&'a T>, ReaderError> {
    match batch.column_by_name(name) {
        None => Ok(None),
        Some(column) => column
            .as_any()
            .downcast_ref::<T>()
            .map(Some)
            .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not {}", name, type_name))),
    }
}

fn required<'a, T: Array + 'static>(
    batch: &'a RecordBatch,
    name: &str,
    type_name: &str,
) -> Result<&'a T, ReaderError> {
    typed_column(batch, name, type_name)?
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))
}

pub(super) fn get_int64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Int64Array, ReaderError> {
    required(batch, name, "Int64")
}

pub(super) fn get_int32_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Int32Array, ReaderError> {
    required(batch, name, "Int32")
}

pub(super) fn get_uint64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a UInt64Array, ReaderError> {
    required(batch, name, "UInt64")
}

pub(super) fn get_float64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float64Array, ReaderError> {
    required(batch, name, "Float64")
}

pub(super) fn get_string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a StringArray, ReaderError> {
    required(batch, name, "Utf8")
}

/// Optional columns of the wrong type count as absent.
pub(super) fn get_optional_float64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Option<&'a Float64Array> {
    typed_column(batch, name, "Float64").ok().flatten()
}

pub(super) fn get_optional_string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Option<&'a StringArray> {
    typed_column(batch, name, "Utf8").ok().flatten()
}

/// Float64 values with nulls read as NaN.
pub(super) fn f64_values(array: &Float64Array) -> impl Iterator<Item = f64> + '_ {
    array.iter().map(|value| value.unwrap_or(f64::NAN))
}

pub(super) fn get_optional_string(array: &StringArray, idx: usize) -> Option<String> {
    (!array.is_null(idx)).then(|| array.value(idx).to_string())
}
