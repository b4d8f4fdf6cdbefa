//! Recursive replacement merge over nested key-value trees
//!
//! `replace_recursive(base, over)` walks both trees at once:
//! - maps merge key by key, recursing where both sides hold a container
//! - lists merge by index (position `i` of `over` replaces position `i` of `base`)
//! - any other value in `over` replaces the value in `base`
//!
//! Keys keep the position they have in `base`; keys only present in `over`
//! are appended in `over`'s order.

use serde_json::{Map, Value};

/// Merge `over` on top of `base`, returning the combined tree.
pub fn replace_recursive(base: &Value, over: &Value) -> Value {
    match (base, over) {
        (Value::Object(base), Value::Object(over)) => Value::Object(replace_map(base, over)),
        (Value::Array(base), Value::Array(over)) => Value::Array(replace_list(base, over)),
        (_, over) => over.clone(),
    }
}

/// Merge a sequence of trees left to right; later entries win.
pub fn replace_all<'a, I>(layers: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut layers = layers.into_iter();
    let Some(first) = layers.next() else {
        return Value::Null;
    };
    layers.fold(first.clone(), |acc, layer| replace_recursive(&acc, layer))
}

pub fn replace_map(base: &Map<String, Value>, over: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in over {
        let next = match merged.get(key) {
            Some(existing) => replace_recursive(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

pub fn replace_list(base: &[Value], over: &[Value]) -> Vec<Value> {
    let mut merged = base.to_vec();
    for (i, value) in over.iter().enumerate() {
        match merged.get_mut(i) {
            Some(slot) => *slot = replace_recursive(slot, value),
            None => merged.push(value.clone()),
        }
    }
    merged
}
