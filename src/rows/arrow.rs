// src/rows/arrow.rs

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray, PrimitiveArray};
use arrow::datatypes::{
    ArrowPrimitiveType, ArrowTemporalType, DataType, Date32Type, Date64Type, Float32Type,
    Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, TimeUnit, TimestampMicrosecondType,
    TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use chrono::SecondsFormat;
use serde_json::Value;
use tracing::trace;

use super::{rows_from_columns, ColumnarData, RowRecord};

/// Convert a `RecordBatch` into columnar JSON, one entry per schema field.
///
/// - nulls                       → `null`
/// - Boolean, Int*, UInt*        → JSON bool / number
/// - Float32/64                  → number (`null` if NaN or infinite)
/// - Utf8, LargeUtf8, Utf8View   → string
/// - Date32/64                   → `"YYYY-MM-DD"`
/// - Timestamp(*)                → RFC 3339 in UTC
/// - anything else               → Arrow's display string
pub fn columns_from_batch(batch: &RecordBatch) -> Result<ColumnarData> {
    let schema = batch.schema();
    let mut columns = ColumnarData::with_capacity(batch.num_columns());

    for (field, array) in schema.fields().iter().zip(batch.columns()) {
        trace!(column = %field.name(), data_type = %field.data_type(), "converting column");
        let values = column_values(array.as_ref())
            .with_context(|| format!("converting column {:?}", field.name()))?;
        columns.insert(field.name().clone(), Value::Array(values));
    }

    Ok(columns)
}

/// Reshape a `RecordBatch` into row records, same semantics as
/// [`rows_from_columns`].
pub fn rows_from_batch(batch: &RecordBatch) -> Result<Vec<RowRecord>> {
    let columns = columns_from_batch(batch)?;
    Ok(rows_from_columns(&columns))
}

fn column_values(array: &dyn Array) -> Result<Vec<Value>> {
    let values = match array.data_type() {
        DataType::Null => vec![Value::Null; array.len()],
        DataType::Boolean => array
            .as_boolean()
            .iter()
            .map(|v| v.map_or(Value::Null, Value::Bool))
            .collect(),

        DataType::Int8 => numbers(array.as_primitive::<Int8Type>()),
        DataType::Int16 => numbers(array.as_primitive::<Int16Type>()),
        DataType::Int32 => numbers(array.as_primitive::<Int32Type>()),
        DataType::Int64 => numbers(array.as_primitive::<Int64Type>()),
        DataType::UInt8 => numbers(array.as_primitive::<UInt8Type>()),
        DataType::UInt16 => numbers(array.as_primitive::<UInt16Type>()),
        DataType::UInt32 => numbers(array.as_primitive::<UInt32Type>()),
        DataType::UInt64 => numbers(array.as_primitive::<UInt64Type>()),
        DataType::Float32 => numbers(array.as_primitive::<Float32Type>()),
        DataType::Float64 => numbers(array.as_primitive::<Float64Type>()),

        DataType::Utf8 => strings(array.as_string::<i32>().iter()),
        DataType::LargeUtf8 => strings(array.as_string::<i64>().iter()),
        DataType::Utf8View => strings(array.as_string_view().iter()),

        DataType::Date32 => dates(array.as_primitive::<Date32Type>()),
        DataType::Date64 => dates(array.as_primitive::<Date64Type>()),

        DataType::Timestamp(TimeUnit::Second, _) => {
            timestamps(array.as_primitive::<TimestampSecondType>())
        }
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            timestamps(array.as_primitive::<TimestampMillisecondType>())
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            timestamps(array.as_primitive::<TimestampMicrosecondType>())
        }
        DataType::Timestamp(TimeUnit::Nanosecond, _) => {
            timestamps(array.as_primitive::<TimestampNanosecondType>())
        }

        // Catch-all (decimals, lists, structs, ...)
        _ => displayed(array)?,
    };
    Ok(values)
}

fn numbers<T>(arr: &PrimitiveArray<T>) -> Vec<Value>
where
    T: ArrowPrimitiveType,
    T::Native: Into<Value>,
{
    // serde_json maps non-finite floats to null
    arr.iter()
        .map(|v| v.map_or(Value::Null, Into::into))
        .collect()
}

fn strings<'a>(iter: impl Iterator<Item = Option<&'a str>>) -> Vec<Value> {
    iter.map(|v| v.map_or(Value::Null, |s| Value::String(s.to_owned())))
        .collect()
}

fn dates<T>(arr: &PrimitiveArray<T>) -> Vec<Value>
where
    T: ArrowTemporalType,
    i64: From<T::Native>,
{
    (0..arr.len())
        .map(|i| {
            if arr.is_null(i) {
                return Value::Null;
            }
            arr.value_as_date(i).map_or(Value::Null, |d| {
                Value::String(d.format("%Y-%m-%d").to_string())
            })
        })
        .collect()
}

fn timestamps<T>(arr: &PrimitiveArray<T>) -> Vec<Value>
where
    T: ArrowTemporalType,
    i64: From<T::Native>,
{
    (0..arr.len())
        .map(|i| {
            if arr.is_null(i) {
                return Value::Null;
            }
            arr.value_as_datetime(i).map_or(Value::Null, |dt| {
                Value::String(dt.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, true))
            })
        })
        .collect()
}

fn displayed(array: &dyn Array) -> Result<Vec<Value>> {
    let options = FormatOptions::default();
    let formatter = ArrayFormatter::try_new(array, &options)
        .with_context(|| format!("no display formatter for {}", array.data_type()))?;

    Ok((0..array.len())
        .map(|i| {
            if array.is_null(i) {
                Value::Null
            } else {
                Value::String(formatter.value(i).to_string())
            }
        })
        .collect())
}
