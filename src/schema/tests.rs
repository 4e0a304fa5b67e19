use super::*;
use arrow::datatypes::DataType;

#[test]
fn test_raw_schema_creation() {
    let schema = create_raw_schema(false, false);
    assert_eq!(schema.fields().len(), 10);
    for name in columns::REQUIRED_RAW_COLUMNS {
        assert!(schema.field_with_name(name).is_ok(), "missing {}", name);
    }
    assert!(schema.field_with_name(columns::DATE_TIME).is_err());

    let full = create_raw_schema(true, true);
    assert_eq!(full.fields().len(), 12);
    assert!(full.field_with_name(columns::INTERNAL_RESISTANCE).is_ok());
}

#[test]
fn test_raw_schema_validation() {
    let schema = create_raw_schema(true, true);
    assert!(validate_raw_schema(&schema).is_ok());

    let steps = create_step_schema(false);
    assert!(matches!(
        validate_raw_schema(&steps),
        Err(SchemaValidationError::MissingColumn(_))
    ));
}

#[test]
fn test_raw_schema_optional_column_type() {
    let base = create_raw_schema(false, false);
    let mut fields: Vec<_> = base.fields().iter().cloned().collect();
    fields.push(std::sync::Arc::new(arrow::datatypes::Field::new(
        columns::DATE_TIME,
        DataType::Utf8,
        true,
    )));
    let schema = arrow::datatypes::Schema::new(fields);
    match validate_raw_schema(&schema) {
        Err(SchemaValidationError::TypeMismatch { column, .. }) => {
            assert_eq!(column, columns::DATE_TIME)
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_unit_metadata() {
    let schema = create_raw_schema(false, false);
    let voltage = schema.field_with_name(columns::VOLTAGE).unwrap();
    assert_eq!(voltage.metadata().get(FIELD_UNIT).unwrap(), "V");
}

#[test]
fn test_schema_carries_file_version() {
    let schema = create_summary_schema::<&str>(false, &[]);
    assert_eq!(
        schema.metadata().get(KEY_FILE_VERSION),
        Some(&FILE_VERSION.to_string())
    );
}

#[test]
fn test_step_schema_flattened_names() {
    let schema = create_step_schema(true);
    // 5 key columns + 7 measures x 7 statistics
    assert_eq!(schema.fields().len(), 5 + 7 * 7);
    assert!(schema.field_with_name("current_avr").is_ok());
    assert!(schema.field_with_name("voltage_delta").is_ok());
    assert!(schema.field_with_name("ir_first").is_ok());
    let step_type = schema.field_with_name(step_columns::TYPE).unwrap();
    assert_eq!(step_type.data_type(), &DataType::Utf8);
}

#[test]
fn test_summary_schema_metric_order() {
    let metrics = [
        summary_columns::CHARGE_CAPACITY,
        summary_columns::COULOMBIC_EFFICIENCY,
    ];
    let schema = create_summary_schema(true, &metrics);
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        names,
        vec![
            summary_columns::DATE_TIME_TXT,
            summary_columns::TEST_TIME,
            summary_columns::DATA_POINT,
            summary_columns::CYCLE_INDEX,
            summary_columns::CHARGE_CAPACITY,
            summary_columns::COULOMBIC_EFFICIENCY,
        ]
    );
}
