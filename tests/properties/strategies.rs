//! Shared generators for YAML-like configuration trees.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// Keys real blueprints use, plus a few that no node accepts.
pub const KEYS: &[&str] = &[
    "title", "type", "label", "fields", "sections", "tabs", "columns", "width", "image", "options",
    "accept", "icon", "help", "text", "theme", "layout", "size", "query", "cover", "ratio",
    "required", "min", "max", "maxlength", "delete", "colour", "extends",
];

pub fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => proptest::sample::select(KEYS).prop_map(|k| k.to_string()),
        1 => "[a-z]{1,6}",
    ]
}

pub fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        "[A-Za-z0-9 /{}.*-]{0,12}".prop_map(Value::String),
    ]
}

/// Nested trees of maps and lists, a few levels deep.
pub fn tree() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::vec((key(), inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

pub fn flat_map() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::vec((key(), scalar()), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}
