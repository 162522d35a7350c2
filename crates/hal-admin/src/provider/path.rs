//! Dot-path access into nested records.
//!
//! A segment addresses a key of an object or, when it is a number, an
//! element of an array: `gallery.0.image`.

use hal_admin_core::Record;
use serde_json::{Map, Value};

/// Expands a path declared against the record's shape into the concrete
/// paths present in `record`, one per element of every array met on the way.
///
/// `gallery.image` over `{"gallery": [{"image": 1}, {"image": 2}]}` yields
/// `gallery.0.image` and `gallery.1.image`.
pub(super) fn expand(record: &Record, path: &str) -> Vec<String> {
    let segments: Vec<&str> = path.split('.').collect();
    let mut paths = vec![];
    if let [first, rest @ ..] = &segments[..] {
        if let Some(value) = record.get(*first) {
            walk(value, first.to_string(), rest, &mut paths);
        }
    }
    paths
}

fn walk(node: &Value, prefix: String, rest: &[&str], paths: &mut Vec<String>) {
    match (node, rest) {
        (_, []) => paths.push(prefix),
        (Value::Array(items), _) => {
            for (index, item) in items.iter().enumerate() {
                walk(item, format!("{}.{}", prefix, index), rest, paths);
            }
        }
        (Value::Object(map), [first, rest @ ..]) => {
            if let Some(child) = map.get(*first) {
                walk(child, format!("{}.{}", prefix, first), rest, paths);
            }
        }
        _ => {}
    }
}

pub(super) fn get<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut node = record.get(segments.next()?)?;
    for segment in segments {
        node = child(node, segment)?;
    }
    Some(node)
}

/// Sets the value at `path`, creating intermediate objects as needed.
///
/// Array elements are never created; a path through a missing element is
/// ignored.
pub(super) fn set(record: &mut Record, path: &str, value: Value) {
    let (parents, last) = split(path);
    let mut segments = parents.into_iter();
    let Some(first) = segments.next() else {
        record.insert(last.to_string(), value);
        return;
    };

    let mut node = record
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    for segment in segments {
        node = match descend(node, segment) {
            Some(node) => node,
            None => return,
        };
    }
    if let Some(slot) = descend(node, last) {
        *slot = value;
    }
}

/// Removes the value at `path`. Removing an array element shifts the ones
/// after it.
pub(super) fn remove(record: &mut Record, path: &str) -> Option<Value> {
    let (parents, last) = split(path);
    let mut segments = parents.into_iter();
    let Some(first) = segments.next() else {
        return record.remove(last);
    };

    let mut node = record.get_mut(first)?;
    for segment in segments {
        node = child_mut(node, segment)?;
    }
    match node {
        Value::Object(map) => map.remove(last),
        Value::Array(items) => {
            let position = index(last)?;
            (position < items.len()).then(|| items.remove(position))
        }
        _ => None,
    }
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(index(segment)?),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => items.get_mut(index(segment)?),
        _ => None,
    }
}

/// Like [`child_mut`], but turns non-container nodes into objects and
/// creates missing keys.
fn descend<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    if !matches!(node, Value::Array(_) | Value::Object(_)) {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Array(items) => items.get_mut(index(segment)?),
        Value::Object(map) => Some(
            map.entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
        ),
        _ => None,
    }
}

fn index(segment: &str) -> Option<usize> {
    segment.parse().ok()
}

fn split(path: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let last = segments.pop().unwrap_or(path);
    (segments, last)
}
