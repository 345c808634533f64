//! Conversion of SQL result rows into opaque JSON records.

use serde_json::{Map, Number, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row};

/// Convert a row into an opaque key-value record.
///
/// Router admin tables mix integer, float, and text columns and their schema
/// is not ours to model, so each column is decoded by trying the concrete
/// types in turn. A column that matches none of them becomes null rather
/// than failing the whole probe.
pub fn row_to_json(row: &MySqlRow) -> Map<String, Value> {
    let mut record = Map::new();
    for (idx, column) in row.columns().iter().enumerate() {
        record.insert(column.name().to_string(), column_value(row, idx));
    }
    record
}

fn column_value(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return v
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return v.map(Value::String).unwrap_or(Value::Null);
    }
    Value::Null
}
