//! Conversion of SQLite result rows into JSON objects.

use rusqlite::types::ValueRef;
use serde_json::{Map, Number, Value};

/// A result row keyed by column name, in the table's column order.
pub type Row = Map<String, Value>;

/// Convert a single SQLite value into JSON.
///
/// Non-finite reals have no JSON representation and become `null`. Text that
/// is not valid UTF-8 is decoded lossily. Blobs become arrays of byte values.
pub fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(value) => Value::from(value),
        ValueRef::Real(value) => Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}

/// Read every column of `row` into a [`Row`].
pub(crate) fn read_row(columns: &[String], row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
    let mut object = Map::with_capacity(columns.len());
    for (index, name) in columns.iter().enumerate() {
        object.insert(name.clone(), value_to_json(row.get_ref(index)?));
    }
    Ok(object)
}
