//! Projection of a nested array buried inside a record into flat rows.
//!
//! `flatten(record, "orders.items.tags")` collects every tag of every item of
//! every order into one list, so a generic table can display it.

use crate::Record;
use serde_json::{Map, Value};

/// Key used to wrap scalar values so every row is an object.
pub const VALUE_KEY: &str = "_value";

/// Returns the rows reached by following the dot-separated `path` from
/// `record`.
///
/// Sequences are expanded at every level. Scalars at the end of the path are
/// wrapped as `{"_value": scalar}`; scalars and arrays met before the end of
/// the path contribute nothing. An empty path yields the record itself.
pub fn flatten(record: &Record, path: &str) -> Vec<Record> {
    let segments: Vec<&str> = if path.is_empty() {
        vec![]
    } else {
        path.split('.').collect()
    };

    let mut rows = vec![];
    collect(record, &segments, &mut rows);
    rows
}

fn collect(node: &Record, path: &[&str], rows: &mut Vec<Record>) {
    let [first, rest @ ..] = path else {
        rows.push(node.clone());
        return;
    };

    let Some(child) = node.get(*first) else {
        return;
    };

    match child {
        Value::Array(items) => {
            for item in items {
                if rest.is_empty() {
                    rows.push(into_row(item));
                } else if let Value::Object(item) = item {
                    collect(item, rest, rows);
                }
            }
        }
        Value::Object(child) if !rest.is_empty() => collect(child, rest, rows),
        _ if rest.is_empty() => rows.push(into_row(child)),
        _ => {}
    }
}

fn into_row(value: &Value) -> Record {
    match value {
        Value::Object(map) => map.clone(),
        other => {
            let mut row = Map::new();
            row.insert(VALUE_KEY.to_string(), other.clone());
            row
        }
    }
}
