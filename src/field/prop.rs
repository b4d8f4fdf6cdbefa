//! Toggleable name lists of the writer field

use serde_json::Value;

use crate::blueprint::{BlueprintError, BlueprintResult};

macro_rules! toggle_list {
    ($(#[$meta:meta])* $name:ident, [$($default:literal),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $name {
            Enabled(Vec<String>),
            Disabled,
        }

        impl Default for $name {
            fn default() -> Self {
                $name::Enabled(Self::DEFAULTS.iter().map(|s| s.to_string()).collect())
            }
        }

        impl $name {
            pub const DEFAULTS: &'static [&'static str] = &[$($default),+];

            /// `true` / `null` enable the defaults, `false` disables.
            pub fn factory(value: Value) -> BlueprintResult<Self> {
                match value {
                    Value::Null | Value::Bool(true) => Ok(Self::default()),
                    Value::Bool(false) => Ok($name::Disabled),
                    Value::Array(items) => items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(name) => Ok(name),
                            _ => Err(BlueprintError::invalid_type(stringify!($name), "item", "string")),
                        })
                        .collect::<BlueprintResult<Vec<_>>>()
                        .map($name::Enabled),
                    _ => Err(BlueprintError::invalid(
                        stringify!($name),
                        "expected a boolean or a list of names",
                    )),
                }
            }

            pub fn names(&self) -> &[String] {
                match self {
                    $name::Enabled(names) => names,
                    $name::Disabled => &[],
                }
            }

            /// Name list, or `false` when disabled
            pub fn render(&self) -> Value {
                match self {
                    $name::Enabled(names) => Value::from(names.clone()),
                    $name::Disabled => Value::Bool(false),
                }
            }
        }
    };
}

toggle_list!(
    /// Inline formatting marks
    Marks,
    ["bold", "italic", "underline", "strike", "code", "link", "email"]
);

toggle_list!(
    /// Block level nodes
    Nodes,
    ["paragraph", "heading", "bulletList", "orderedList"]
);
