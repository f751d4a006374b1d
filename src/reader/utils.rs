use arrow::array::{Array, FixedSizeListArray, Float32Array, Float64Array, UInt32Array};
use arrow::record_batch::RecordBatch;

use super::ReaderError;

/// Get a required UInt32 column by name.
pub(super) fn get_uint32_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a UInt32Array, ReaderError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<UInt32Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not UInt32", name)))
}

/// Get a required Float64 column by name.
pub(super) fn get_float64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float64Array, ReaderError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not Float64", name)))
}

/// Get a required `FixedSizeList<Float32>` column by name, returning the
/// list array and its flattened values.
pub(super) fn get_spectrum_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<(&'a FixedSizeListArray, &'a Float32Array), ReaderError> {
    let list = batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<FixedSizeListArray>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not a FixedSizeList", name)))?;
    let values = list
        .values()
        .as_any()
        .downcast_ref::<Float32Array>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} items are not Float32", name)))?;
    Ok((list, values))
}
