use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A `.`-separated key path into nested JSON. Empty segments are ignored, so
/// `"a..b"` and `"a.b"` address the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> DotPath<'a> {
    pub fn parse(path: &'a str) -> Self {
        Self {
            segments: path.split('.').filter(|s| !s.is_empty()).collect(),
        }
    }

    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Read the value at `path`, or `default`.
///
/// A literal top-level key equal to `path` wins over segment traversal.
/// Numeric segments index into arrays. `null` counts as absent.
pub fn dot_get<'a>(root: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    if let Some(value) = root.as_object().and_then(|map| map.get(path)) {
        if !value.is_null() {
            return value;
        }
    }

    let path = DotPath::parse(path);
    if path.is_empty() {
        return default;
    }

    let mut current = root;
    for segment in path.segments() {
        match child(current, segment) {
            Some(next) if !next.is_null() => current = next,
            _ => return default,
        }
    }

    current
}

/// Write `value` at `path`, creating an empty object for every intermediate
/// segment that is absent or holds a scalar. Arrays are kept when the segment
/// is an index within bounds (or one past the end, which appends); otherwise
/// they are converted to objects keyed by index so the new key can live next
/// to the existing elements.
pub fn dot_set(root: &mut Value, path: &str, value: Value) -> Result<()> {
    let path = DotPath::parse(path);
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(Error::validation_invalid_argument(
            "path",
            "Dot path must contain at least one segment",
            None,
            None,
        ));
    };

    let mut current = root;
    for segment in parents {
        current = descend(current, segment);
    }

    *descend(current, last) = value;
    Ok(())
}

/// Remove the value at `path`. Returns the removed value, if any.
pub fn dot_remove(root: &mut Value, path: &str) -> Option<Value> {
    let path = DotPath::parse(path);
    let (last, parents) = path.segments().split_last()?;

    let mut current = root;
    for segment in parents {
        current = child_mut(current, segment)?;
    }

    match current {
        Value::Object(map) => map.shift_remove(*last),
        Value::Array(items) => {
            let index = array_index(last, items.len())?;
            Some(items.remove(index))
        }
        _ => None,
    }
}

fn child<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => array_index(segment, items.len()).map(|i| &items[i]),
        _ => None,
    }
}

fn child_mut<'v>(value: &'v mut Value, segment: &str) -> Option<&'v mut Value> {
    match value {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => {
            let index = array_index(segment, items.len())?;
            items.get_mut(index)
        }
        _ => None,
    }
}

/// Canonical decimal index: ASCII digits with no sign and no leading zero.
/// `"01"` and `"+1"` are keys, not positions.
pub(super) fn canonical_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

fn array_index(segment: &str, len: usize) -> Option<usize> {
    canonical_index(segment).filter(|i| *i < len)
}

/// Make `current` a container that can hold `segment`, then return the slot.
fn descend<'v>(current: &'v mut Value, segment: &str) -> &'v mut Value {
    prepare_container(current, segment);

    match current {
        Value::Array(items) => {
            let index = canonical_index(segment).unwrap_or_default();
            &mut items[index]
        }
        Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
        _ => unreachable!("prepare_container leaves an array or object"),
    }
}

fn prepare_container(current: &mut Value, segment: &str) {
    match current {
        Value::Object(_) => {}
        Value::Array(items) => match canonical_index(segment) {
            Some(index) if index < items.len() => {}
            Some(index) if index == items.len() => items.push(Value::Null),
            _ => {
                let map: Map<String, Value> = std::mem::take(items)
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect();
                *current = Value::Object(map);
            }
        },
        _ => *current = Value::Object(Map::new()),
    }
}
