use super::*;
use arrow::datatypes::DataType;

#[test]
fn test_raw_data_schema() {
    let schema = create_raw_data_schema(5, "nA");
    assert_eq!(schema.fields().len(), 1);

    let field = schema.field_with_name(RAW_DATA_COLUMN).unwrap();
    assert!(!field.is_nullable());
    match field.data_type() {
        DataType::FixedSizeList(item, len) => {
            assert_eq!(*len, 5);
            assert_eq!(item.data_type(), &DataType::Float32);
        }
        other => panic!("unexpected type {:?}", other),
    }
    assert_eq!(field.metadata().get(FIELD_UNIT).unwrap(), "nA");
    assert_eq!(
        schema.metadata().get(KEY_FORMAT_VERSION).unwrap(),
        FORMAT_VERSION
    );
}

#[test]
fn test_axis_schemas() {
    let indices = create_indices_schema(&["X", "Y"], &["nm", "nm"]);
    assert_eq!(indices.fields().len(), 2);
    assert_eq!(
        indices.field_with_name("Y").unwrap().data_type(),
        &DataType::UInt32
    );

    let values = create_values_schema(&["Bias"], &["V"]);
    let field = values.field_with_name("Bias").unwrap();
    assert_eq!(field.data_type(), &DataType::Float64);
    assert_eq!(field.metadata().get(FIELD_UNIT).unwrap(), "V");
}

#[test]
fn test_entry_paths() {
    assert_eq!(
        dataset_path(RAW_DATA),
        "Measurement_000/Channel_000/Raw_Data.parquet"
    );
    assert_eq!(
        channel_attributes_path(),
        "Measurement_000/Channel_000/attributes.json"
    );
    assert_eq!(
        measurement_attributes_path(),
        "Measurement_000/attributes.json"
    );
    assert_eq!(
        reference_key(POSITION_VALUES),
        "probegrid:ref:Position_Values"
    );
}

#[test]
fn test_channel_datasets_start_with_main() {
    assert_eq!(CHANNEL_DATASETS[0], RAW_DATA);
    assert_eq!(&CHANNEL_DATASETS[1..], &ANCILLARY_DATASETS[..]);
}
