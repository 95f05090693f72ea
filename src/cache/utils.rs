use arrow::array::{Array, ArrayRef, AsArray, Float64Array, Int64Array, StringArray, UInt32Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type, UInt32Type};
use arrow::record_batch::RecordBatch;

use super::CacheError;

/// Fetch column `name` as `data_type`, casting compatible stored types.
///
/// Casts are safe: a value that does not fit becomes null and is rejected by
/// the null check.
fn normalized_column(
    batch: &RecordBatch,
    name: &str,
    data_type: &DataType,
) -> Result<ArrayRef, CacheError> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| CacheError::ColumnNotFound(name.to_string()))?;

    let array = if column.data_type() == data_type {
        column.clone()
    } else {
        cast(column.as_ref(), data_type).map_err(|e| {
            CacheError::InvalidFormat(format!(
                "{} cannot be read as {:?}: {}",
                name, data_type, e
            ))
        })?
    };

    if array.null_count() > 0 {
        return Err(CacheError::InvalidFormat(format!(
            "{} contains {} null values",
            name,
            array.null_count()
        )));
    }
    Ok(array)
}

/// Get a required column as Int64.
pub(super) fn get_int64_column(batch: &RecordBatch, name: &str) -> Result<Int64Array, CacheError> {
    let array = normalized_column(batch, name, &DataType::Int64)?;
    Ok(array.as_primitive::<Int64Type>().clone())
}

/// Get a required column as UInt32.
pub(super) fn get_uint32_column(batch: &RecordBatch, name: &str) -> Result<UInt32Array, CacheError> {
    let array = normalized_column(batch, name, &DataType::UInt32)?;
    Ok(array.as_primitive::<UInt32Type>().clone())
}

/// Get a required column as Float64.
pub(super) fn get_float64_column(
    batch: &RecordBatch,
    name: &str,
) -> Result<Float64Array, CacheError> {
    let array = normalized_column(batch, name, &DataType::Float64)?;
    Ok(array.as_primitive::<Float64Type>().clone())
}

/// Get a required column as Utf8.
pub(super) fn get_string_column(batch: &RecordBatch, name: &str) -> Result<StringArray, CacheError> {
    let array = normalized_column(batch, name, &DataType::Utf8)?;
    Ok(array.as_string::<i32>().clone())
}
