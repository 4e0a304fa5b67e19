use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::columns;
use super::constants::{FIELD_UNIT, FILE_VERSION, KEY_FILE_VERSION};
use super::step_columns;
use super::summary_columns;

/// Creates a Field annotated with its physical unit
fn field_with_unit(name: &str, data_type: DataType, nullable: bool, unit: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert(FIELD_UNIT.to_string(), unit.to_string());
    Field::new(name, data_type, nullable).with_metadata(metadata)
}

fn versioned(builder: SchemaBuilder) -> Schema {
    let mut schema_metadata = HashMap::new();
    schema_metadata.insert(KEY_FILE_VERSION.to_string(), FILE_VERSION.to_string());
    builder.finish().with_metadata(schema_metadata)
}

/// Creates the Arrow schema of the raw measurement table.
///
/// `date_time` and `internal_resistance` are only present when the source
/// provided them.
///
/// # Example
///
/// ```
/// use cellpeak::schema::create_raw_schema;
///
/// let schema = create_raw_schema(true, false);
/// assert_eq!(schema.fields().len(), 11);
/// ```
pub fn create_raw_schema(with_date_time: bool, with_internal_resistance: bool) -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(Field::new(columns::DATA_POINT, DataType::Int64, false));
    builder.push(field_with_unit(columns::TEST_TIME, DataType::Float64, false, "s"));
    builder.push(field_with_unit(columns::STEP_TIME, DataType::Float64, false, "s"));
    if with_date_time {
        builder.push(field_with_unit(columns::DATE_TIME, DataType::Float64, true, "xldate"));
    }
    builder.push(Field::new(columns::STEP_INDEX, DataType::Int32, false));
    builder.push(Field::new(columns::CYCLE_INDEX, DataType::Int32, false));
    builder.push(Field::new(columns::SUB_STEP_INDEX, DataType::Int32, false));
    builder.push(field_with_unit(columns::CURRENT, DataType::Float64, false, "raw current"));
    builder.push(field_with_unit(columns::VOLTAGE, DataType::Float64, false, "V"));
    builder.push(field_with_unit(
        columns::CHARGE_CAPACITY,
        DataType::Float64,
        false,
        "raw charge",
    ));
    builder.push(field_with_unit(
        columns::DISCHARGE_CAPACITY,
        DataType::Float64,
        false,
        "raw charge",
    ));
    if with_internal_resistance {
        builder.push(field_with_unit(
            columns::INTERNAL_RESISTANCE,
            DataType::Float64,
            true,
            "Ohm",
        ));
    }

    versioned(builder)
}

/// Creates the Arrow schema of the step table.
pub fn create_step_schema(with_ir: bool) -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(Field::new(step_columns::CYCLE, DataType::Int32, false));
    builder.push(Field::new(step_columns::STEP, DataType::Int32, false));
    builder.push(Field::new(step_columns::SUB_STEP, DataType::Int32, false));
    builder.push(Field::new(step_columns::TYPE, DataType::Utf8, false));
    builder.push(Field::new(step_columns::INFO, DataType::Utf8, true));

    let mut measures: Vec<&str> = step_columns::MEASURES.to_vec();
    if with_ir {
        measures.push(step_columns::IR);
    }
    for measure in measures {
        for statistic in step_columns::STATISTICS {
            builder.push(Field::new(
                step_columns::flattened(measure, statistic),
                DataType::Float64,
                true,
            ));
        }
    }

    versioned(builder)
}

/// Creates the Arrow schema of a summary table.
///
/// The leading identification columns are fixed, the metric columns follow
/// in the given order.
pub fn create_summary_schema<S: AsRef<str>>(with_date_time_txt: bool, metrics: &[S]) -> Schema {
    let mut builder = SchemaBuilder::new();

    if with_date_time_txt {
        builder.push(Field::new(summary_columns::DATE_TIME_TXT, DataType::Utf8, true));
    }
    builder.push(field_with_unit(summary_columns::TEST_TIME, DataType::Float64, false, "s"));
    builder.push(Field::new(summary_columns::DATA_POINT, DataType::Int64, false));
    builder.push(Field::new(summary_columns::CYCLE_INDEX, DataType::Int32, false));
    for metric in metrics {
        builder.push(Field::new(metric.as_ref(), DataType::Float64, true));
    }

    versioned(builder)
}

/// Creates the Arrow schema of the raw file provenance table.
pub fn create_fid_schema() -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(Field::new("name", DataType::Utf8, false));
    builder.push(Field::new("full_name", DataType::Utf8, false));
    builder.push(Field::new("location", DataType::Utf8, false));
    builder.push(field_with_unit("size", DataType::UInt64, false, "bytes"));
    builder.push(field_with_unit("last_modified", DataType::Float64, false, "s"));
    builder.push(field_with_unit("last_accessed", DataType::Float64, false, "s"));
    builder.push(field_with_unit("last_info_changed", DataType::Float64, false, "s"));
    builder.push(Field::new("files_length", DataType::UInt64, false));

    versioned(builder)
}

/// Arc-wrapped raw schema for record batch construction
pub fn create_raw_schema_arc(with_date_time: bool, with_internal_resistance: bool) -> Arc<Schema> {
    Arc::new(create_raw_schema(with_date_time, with_internal_resistance))
}
