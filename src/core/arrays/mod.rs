//! Helpers over JSON collections: dot-path access, grouping, flattening,
//! sorting and sampling.
//!
//! Collections are `serde_json::Value`s so nested data keeps its shape. Object
//! keys keep insertion order.

use std::cmp::Ordering;
use std::str::FromStr;

use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

mod dot_path;

pub use dot_path::{dot_get, dot_remove, dot_set, DotPath};
use dot_path::canonical_index;

/// Top-level lookup by key (objects) or index (arrays). `null` counts as
/// absent.
pub fn get<'a>(value: &'a Value, key: &str, default: &'a Value) -> &'a Value {
    let found = match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => canonical_index(key).and_then(|i| items.get(i)),
        _ => None,
    };
    match found {
        Some(v) if !v.is_null() => v,
        _ => default,
    }
}

/// True for a non-empty object whose keys are not exactly `"0".."n-1"` in
/// order. Arrays are never associative.
pub fn is_associative(value: &Value) -> bool {
    match value {
        Value::Object(map) if !map.is_empty() => map
            .keys()
            .enumerate()
            .any(|(i, key)| *key != i.to_string()),
        _ => false,
    }
}

/// Partition records by the value of `key`, keeping first-seen group order and
/// input order within each group. Records where the key is missing, `null`, or
/// not a scalar are skipped.
pub fn group_by(items: &[Value], key: &str) -> Map<String, Value> {
    let mut groups = Map::new();

    for item in items {
        let Some(group) = item.get(key).and_then(group_key) else {
            continue;
        };
        let entry = groups
            .entry(group)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(members) = entry {
            members.push(item.clone());
        }
    }

    groups
}

fn group_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Collapse nesting into a single level of leaves, depth-first.
///
/// Leaves reached through object keys keep their key; a later leaf with the
/// same key overwrites the earlier value in place. Leaves reached through
/// arrays are appended with fresh indices. The result is an array when no
/// leaf carried a key, otherwise an object. Empty containers contribute
/// nothing.
pub fn flatten(value: &Value) -> Value {
    let mut leaves = Vec::new();
    collect_leaves(value, &mut leaves);

    if leaves.iter().all(|(key, _)| key.is_none()) {
        return Value::Array(leaves.into_iter().map(|(_, v)| v).collect());
    }

    let mut out = Map::new();
    let mut next_index = 0usize;
    for (key, leaf) in leaves {
        let key = key.unwrap_or_else(|| {
            let index = next_index.to_string();
            next_index += 1;
            index
        });
        out.insert(key, leaf);
    }
    Value::Object(out)
}

fn collect_leaves(value: &Value, leaves: &mut Vec<(Option<String>, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if is_container(child) {
                    collect_leaves(child, leaves);
                } else {
                    leaves.push((Some(key.clone()), child.clone()));
                }
            }
        }
        Value::Array(items) => {
            for child in items {
                if is_container(child) {
                    collect_leaves(child, leaves);
                } else {
                    leaves.push((None, child.clone()));
                }
            }
        }
        leaf => leaves.push((None, leaf.clone())),
    }
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

/// The value of `key` from every record, `null` where it is missing.
pub fn pluck(items: &[Value], key: &str) -> Vec<Value> {
    items
        .iter()
        .map(|item| item.get(key).cloned().unwrap_or(Value::Null))
        .collect()
}

/// Drop repeated values, keeping the first occurrence.
pub fn unique(items: &[Value]) -> Vec<Value> {
    let mut seen: Vec<&Value> = Vec::new();
    let mut out = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
            out.push(item.clone());
        }
    }
    out
}

/// Records whose `key` equals `value`.
pub fn filter_by_value(items: &[Value], key: &str, value: &Value) -> Vec<Value> {
    items
        .iter()
        .filter(|item| item.get(key) == Some(value))
        .cloned()
        .collect()
}

/// First element of an array, or first value of an object.
pub fn first(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        Value::Object(map) => map.values().next(),
        _ => None,
    }
}

/// Last element of an array, or last value of an object.
pub fn last(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.last(),
        Value::Object(map) => map.values().next_back(),
        _ => None,
    }
}

/// Split into consecutive chunks of `size`; the last chunk may be shorter.
pub fn chunk(items: &[Value], size: usize) -> Result<Vec<Vec<Value>>> {
    if size == 0 {
        return Err(Error::validation_invalid_argument(
            "size",
            "Chunk size must be greater than zero",
            None,
            None,
        ));
    }
    Ok(items.chunks(size).map(<[Value]>::to_vec).collect())
}

pub fn shuffle(items: &[Value]) -> Vec<Value> {
    let mut out = items.to_vec();
    out.shuffle(&mut rand::rng());
    out
}

pub fn random_one(items: &[Value]) -> Option<&Value> {
    items.choose(&mut rand::rng())
}

/// Up to `count` distinct elements, in their original order.
pub fn random_many(items: &[Value], count: usize) -> Vec<Value> {
    let amount = count.min(items.len());
    let mut indices = rand::seq::index::sample(&mut rand::rng(), items.len(), amount).into_vec();
    indices.sort_unstable();
    indices.into_iter().map(|i| items[i].clone()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(Error::validation_invalid_argument(
                "direction",
                format!("Unknown sort direction: {}", s),
                None,
                Some(vec!["asc".to_string(), "desc".to_string()]),
            )),
        }
    }
}

/// One sort criterion. Parsed from `field` or `field:desc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (field, direction) = match s.rsplit_once(':') {
            Some((field, direction)) => (field, direction.parse()?),
            None => (s, SortDirection::Asc),
        };
        if field.is_empty() {
            return Err(Error::validation_invalid_argument(
                "sort",
                "Sort key needs a field name",
                Some(s.to_string()),
                None,
            ));
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// Stable multi-key sort. Later keys break ties left by earlier ones; records
/// equal on every key keep their input order.
pub fn sort_by_keys(items: &[Value], keys: &[SortKey]) -> Vec<Value> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| {
        for key in keys {
            let left = a.get(&key.field).unwrap_or(&Value::Null);
            let right = b.get(&key.field).unwrap_or(&Value::Null);
            let ordering = match key.direction {
                SortDirection::Asc => compare_values(left, right),
                SortDirection::Desc => compare_values(right, left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    out
}

/// Total order over JSON values: numbers numerically, strings
/// lexicographically, `false < true`. Mixed types order as
/// null < bool < number < string < array < object.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x.len().cmp(&y.len()),
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
