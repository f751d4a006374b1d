use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};

use super::constants::{KEY_FORMAT_VERSION, FORMAT_VERSION, RAW_DATA_COLUMN};

/// Field metadata key carrying the physical unit of a column
pub const FIELD_UNIT: &str = "unit";

/// Creates a Field annotated with its physical unit
fn field_with_unit(name: &str, data_type: DataType, unit: &str) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert(FIELD_UNIT.to_string(), unit.to_string());
    Field::new(name, data_type, false).with_metadata(metadata)
}

fn schema_metadata() -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert(KEY_FORMAT_VERSION.to_string(), FORMAT_VERSION.to_string());
    metadata
}

/// Item field of the main dataset's fixed-size list
pub fn raw_data_item_field() -> Arc<Field> {
    Arc::new(Field::new("item", DataType::Float32, false))
}

/// Creates the schema of the main dataset: one row per scan position, one
/// `FixedSizeList<Float32>` of `spectral_length` values per row.
///
/// # Example
///
/// ```
/// use arrow::datatypes::DataType;
/// use probegrid::schema::create_raw_data_schema;
///
/// let schema = create_raw_data_schema(128, "nA");
/// match schema.field(0).data_type() {
///     DataType::FixedSizeList(_, len) => assert_eq!(*len, 128),
///     other => panic!("unexpected type {other}"),
/// }
/// ```
pub fn create_raw_data_schema(spectral_length: i32, data_unit: &str) -> Schema {
    let mut builder = SchemaBuilder::new();
    builder.push(field_with_unit(
        RAW_DATA_COLUMN,
        DataType::FixedSizeList(raw_data_item_field(), spectral_length),
        data_unit,
    ));
    builder.finish().with_metadata(schema_metadata())
}

/// Creates the schema of an index dataset: one `UInt32` column per label
pub fn create_indices_schema(labels: &[&str], units: &[&str]) -> Schema {
    create_axis_schema(labels, units, DataType::UInt32)
}

/// Creates the schema of a value dataset: one `Float64` column per label
pub fn create_values_schema(labels: &[&str], units: &[&str]) -> Schema {
    create_axis_schema(labels, units, DataType::Float64)
}

fn create_axis_schema(labels: &[&str], units: &[&str], data_type: DataType) -> Schema {
    let mut builder = SchemaBuilder::new();
    for (label, unit) in labels.iter().zip(units) {
        builder.push(field_with_unit(label, data_type.clone(), unit));
    }
    builder.finish().with_metadata(schema_metadata())
}

/// Creates an Arc-wrapped main dataset schema
pub fn create_raw_data_schema_arc(spectral_length: i32, data_unit: &str) -> Arc<Schema> {
    Arc::new(create_raw_data_schema(spectral_length, data_unit))
}
