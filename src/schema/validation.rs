use arrow::datatypes::{DataType, Schema};

use super::columns;

const REQUIRED: [(&str, DataType); 10] = [
    (columns::DATA_POINT, DataType::Int64),
    (columns::TEST_TIME, DataType::Float64),
    (columns::STEP_TIME, DataType::Float64),
    (columns::STEP_INDEX, DataType::Int32),
    (columns::CYCLE_INDEX, DataType::Int32),
    (columns::SUB_STEP_INDEX, DataType::Int32),
    (columns::CURRENT, DataType::Float64),
    (columns::VOLTAGE, DataType::Float64),
    (columns::CHARGE_CAPACITY, DataType::Float64),
    (columns::DISCHARGE_CAPACITY, DataType::Float64),
];

const OPTIONAL: [(&str, DataType); 2] = [
    (columns::DATE_TIME, DataType::Float64),
    (columns::INTERNAL_RESISTANCE, DataType::Float64),
];

/// Check that a schema can hold a raw table.
///
/// Every required column must be present with its type. Optional columns
/// may be absent but must have the right type when present.
pub fn validate_raw_schema(schema: &Schema) -> Result<(), SchemaValidationError> {
    let check = |name: &str, expected: &DataType, required: bool| {
        match schema.field_with_name(name) {
            Ok(field) if field.data_type() != expected => Err(SchemaValidationError::TypeMismatch {
                column: name.to_string(),
                expected: format!("{:?}", expected),
                found: format!("{:?}", field.data_type()),
            }),
            Ok(_) => Ok(()),
            Err(_) if required => Err(SchemaValidationError::MissingColumn(name.to_string())),
            Err(_) => Ok(()),
        }
    };

    for (name, expected) in &REQUIRED {
        check(*name, expected, true)?;
    }
    for (name, expected) in &OPTIONAL {
        check(*name, expected, false)?;
    }
    Ok(())
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column has the wrong data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Column name
        column: String,
        /// Expected data type
        expected: String,
        /// Data type found
        found: String,
    },
}
