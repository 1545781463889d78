// src/rows/mod.rs

use serde_json::{Map, Value};
use tracing::debug;

pub mod arrow;

pub use self::arrow::{columns_from_batch, rows_from_batch};

/// Field name → column of values, aligned by position across fields.
/// Key order is insertion order (`serde_json` is built with `preserve_order`).
pub type ColumnarData = Map<String, Value>;

/// One reconstructed record: field name → the value at a single position.
pub type RowRecord = Map<String, Value>;

/// Reshape a columnar JSON object into row records.
///
/// Anything that is not an object (absent, `null`, arrays, scalars) yields
/// an empty result rather than an error.
pub fn transform_to_rows(columnar: Option<&Value>) -> Vec<RowRecord> {
    match columnar {
        Some(Value::Object(columns)) => rows_from_columns(columns),
        Some(other) => {
            debug!(kind = value_kind(other), "columnar input is not an object");
            Vec::new()
        }
        None => {
            debug!("columnar input is absent");
            Vec::new()
        }
    }
}

/// Row count comes from the first key's column. Shorter columns are padded
/// with `null`; longer ones are cut to that count.
pub fn rows_from_columns(columns: &ColumnarData) -> Vec<RowRecord> {
    let row_count = columns
        .values()
        .next()
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    (0..row_count)
        .map(|i| {
            columns
                .iter()
                .map(|(name, column)| (name.clone(), cell(column, i)))
                .collect::<RowRecord>()
        })
        .collect()
}

fn cell(column: &Value, i: usize) -> Value {
    column
        .as_array()
        .and_then(|values| values.get(i))
        .cloned()
        .unwrap_or(Value::Null)
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test;
    use serde_json::json;

    #[test]
    fn equal_length_columns() {
        init_test();
        let input = json!({
            "id": [1, 2, 3, 4],
            "name": ["a", "b", "c", "d"],
            "active": [true, false, true, false],
        });
        let rows = transform_to_rows(Some(&input));

        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_eq!(row.len(), 3);
        }
        assert_eq!(
            Value::Object(rows[2].clone()),
            json!({"id": 3, "name": "c", "active": true})
        );
    }

    #[test]
    fn short_columns_are_padded_with_null() {
        let input = json!({"a": [1, 2, 3], "b": [10]});
        let rows = transform_to_rows(Some(&input));

        assert_eq!(rows.len(), 3);
        assert_eq!(Value::Object(rows[0].clone()), json!({"a": 1, "b": 10}));
        assert_eq!(Value::Object(rows[1].clone()), json!({"a": 2, "b": null}));
        assert_eq!(Value::Object(rows[2].clone()), json!({"a": 3, "b": null}));
    }

    #[test]
    fn first_key_decides_row_count() {
        let input = json!({"b": [10], "a": [1, 2, 3]});
        let rows = transform_to_rows(Some(&input));

        assert_eq!(rows.len(), 1);
        assert_eq!(Value::Object(rows[0].clone()), json!({"b": 10, "a": 1}));
    }

    #[test]
    fn row_keys_keep_input_order() {
        let input = json!({"zeta": [1], "alpha": [2], "mid": [3]});
        let rows = transform_to_rows(Some(&input));
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn absent_or_non_object_input_is_empty() {
        init_test();
        assert!(transform_to_rows(None).is_empty());
        assert!(transform_to_rows(Some(&Value::Null)).is_empty());
        assert!(transform_to_rows(Some(&json!([1, 2, 3]))).is_empty());
        assert!(transform_to_rows(Some(&json!("columns"))).is_empty());
        assert!(transform_to_rows(Some(&json!({}))).is_empty());
    }

    #[test]
    fn non_array_columns_read_as_null() {
        let input = json!({"a": [1, 2], "b": "scalar", "c": [null, 5]});
        let rows = transform_to_rows(Some(&input));

        assert_eq!(rows.len(), 2);
        assert_eq!(
            Value::Object(rows[0].clone()),
            json!({"a": 1, "b": null, "c": null})
        );
        assert_eq!(
            Value::Object(rows[1].clone()),
            json!({"a": 2, "b": null, "c": 5})
        );

        // a scalar first column means no rows at all
        let input = json!({"b": "scalar", "a": [1, 2]});
        assert!(transform_to_rows(Some(&input)).is_empty());
    }

    #[test]
    fn reshaping_is_repeatable() {
        let input = json!({"a": [1, 2], "b": ["x"]});
        let first = transform_to_rows(Some(&input));
        let second = transform_to_rows(Some(&input));
        assert_eq!(first, second);
        assert_eq!(input, json!({"a": [1, 2], "b": ["x"]}));
    }
}
