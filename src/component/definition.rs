//! Component definitions
//!
//! Definitions are YAML maps. Props are plain values copied as they are,
//! or typed props (a map with a `type` key) that take the caller's
//! attribute. A typed prop without `default` is required.
//!
//! ```yaml
//! extends: button
//! mixins: [sizeable]
//! props:
//!   icon: page
//!   label:
//!     type: string
//!   size:
//!     type: string
//!     default: medium
//!     values: [small, medium, large]
//! computed:
//!   title: "{{ label }} ({{ size }})"
//! methods:
//!   greet: "Hello {{ 0 }}, this is {{ label }}"
//! toArray: [label, title]
//! ```
//!
//! Native definitions can be assembled with the builder methods and
//! arbitrary closures instead.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::error::{ComponentError, ComponentResult, PropError};
use super::Component;
use crate::model::template;

/// Called with the component built so far (attributes and earlier props)
/// and the attribute of the same name.
pub type PropFn =
    Arc<dyn Fn(&Component, Option<&Value>) -> Result<Value, PropError> + Send + Sync>;
pub type ComputedFn = Arc<dyn Fn(&Component) -> Value + Send + Sync>;
pub type MethodFn = Arc<dyn Fn(&Component, &[Value]) -> Value + Send + Sync>;
pub type ToArrayFn = Arc<dyn Fn(&Component) -> Map<String, Value> + Send + Sync>;

#[derive(Clone)]
pub enum PropSpec {
    /// Copied verbatim
    Value(Value),
    /// Called with the attribute of the same name, if one was given
    Function(PropFn),
}

impl fmt::Debug for PropSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropSpec::Value(value) => f.debug_tuple("Value").field(value).finish(),
            PropSpec::Function(_) => f.write_str("Function"),
        }
    }
}

/// Accepted value type of a typed prop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    Any,
    String,
    Number,
    Integer,
    Bool,
    List,
    Map,
}

impl PropType {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "any" | "mixed" => PropType::Any,
            "string" => PropType::String,
            "number" | "float" => PropType::Number,
            "integer" | "int" => PropType::Integer,
            "bool" | "boolean" => PropType::Bool,
            "list" | "array" => PropType::List,
            "map" | "object" => PropType::Map,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropType::Any => "any",
            PropType::String => "string",
            PropType::Number => "number",
            PropType::Integer => "integer",
            PropType::Bool => "bool",
            PropType::List => "list",
            PropType::Map => "map",
        }
    }

    /// `null` passes every type.
    pub fn check(&self, value: &Value) -> Result<(), PropError> {
        let ok = match (self, value) {
            (_, Value::Null) | (PropType::Any, _) => true,
            (PropType::String, Value::String(_)) => true,
            (PropType::Number, Value::Number(_)) => true,
            (PropType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (PropType::Bool, Value::Bool(_)) => true,
            (PropType::List, Value::Array(_)) => true,
            (PropType::Map, Value::Object(_)) => true,
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(PropError::InvalidType {
                expected: self.as_str(),
            })
        }
    }
}

/// Build the prop function of a typed prop.
pub fn typed_prop(kind: PropType, default: Option<Value>, values: Option<Vec<Value>>) -> PropFn {
    Arc::new(move |_: &Component, attr: Option<&Value>| {
        let value = match attr {
            Some(value) => value.clone(),
            None => default.clone().ok_or(PropError::Missing)?,
        };
        kind.check(&value)?;
        if let Some(values) = &values {
            if !value.is_null() && !values.contains(&value) {
                return Err(PropError::InvalidType {
                    expected: "one of the allowed values",
                });
            }
        }
        Ok(value)
    })
}

#[derive(Clone, Default)]
pub struct Definition {
    pub props: Vec<(String, PropSpec)>,
    pub computed: Vec<(String, ComputedFn)>,
    pub methods: Vec<(String, MethodFn)>,
    pub to_array: Option<ToArrayFn>,
    /// The full merged definition map
    pub options: Map<String, Value>,
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let computed: Vec<&String> = self.computed.iter().map(|(n, _)| n).collect();
        let methods: Vec<&String> = self.methods.iter().map(|(n, _)| n).collect();
        f.debug_struct("Definition")
            .field("props", &self.props)
            .field("computed", &computed)
            .field("methods", &methods)
            .field("to_array", &self.to_array.is_some())
            .finish()
    }
}

impl Definition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.props.push((name.into(), PropSpec::Value(value)));
        self
    }

    pub fn prop_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Component, Option<&Value>) -> Result<Value, PropError> + Send + Sync + 'static,
    {
        let spec = PropSpec::Function(Arc::new(f));
        self.props.push((name.into(), spec));
        self
    }

    pub fn computed<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Component) -> Value + Send + Sync + 'static,
    {
        self.computed.push((name.into(), Arc::new(f)));
        self
    }

    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Component, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.methods.push((name.into(), Arc::new(f)));
        self
    }

    pub fn with_to_array<F>(mut self, f: F) -> Self
    where
        F: Fn(&Component) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.to_array = Some(Arc::new(f));
        self
    }

    /// Compile a (merged) definition map.
    pub fn from_value(name: &str, definition: Value) -> ComponentResult<Self> {
        let options = match definition {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            _ => return Err(invalid(name, "definition must be a map")),
        };

        let mut compiled = Self::new();
        for (prop, spec) in section(name, &options, "props")? {
            let spec = prop_spec(name, prop, spec)?;
            compiled.props.push((prop.clone(), spec));
        }
        for (computed, value) in section(name, &options, "computed")? {
            let f = computed_fn(value.clone());
            compiled.computed.push((computed.clone(), f));
        }
        for (method, value) in section(name, &options, "methods")? {
            let Value::String(body) = value else {
                let message = format!("method '{method}' must be a template string");
                return Err(invalid(name, message));
            };
            let f = method_fn(body.clone());
            compiled.methods.push((method.clone(), f));
        }
        compiled.to_array = match options.get("toArray") {
            None | Some(Value::Null) => None,
            Some(Value::Array(keys)) => {
                let keys = keys
                    .iter()
                    .map(|k| k.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| invalid(name, "toArray must list prop names"))?;
                Some(pick_fn(keys))
            }
            Some(_) => return Err(invalid(name, "toArray must list prop names")),
        };

        compiled.options = options;
        Ok(compiled)
    }
}

fn invalid(name: &str, message: impl Into<String>) -> ComponentError {
    ComponentError::InvalidDefinition {
        name: name.to_string(),
        message: message.into(),
    }
}

fn section<'a>(
    name: &str,
    options: &'a Map<String, Value>,
    key: &str,
) -> ComponentResult<Vec<(&'a String, &'a Value)>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(entries)) => Ok(entries.iter().collect()),
        Some(_) => Err(invalid(name, format!("{key} must be a map"))),
    }
}

fn prop_spec(name: &str, prop: &str, spec: &Value) -> ComponentResult<PropSpec> {
    let Some(type_name) = spec.get("type") else {
        return Ok(PropSpec::Value(spec.clone()));
    };
    let Some(kind) = type_name.as_str().and_then(PropType::from_name) else {
        let message = format!("prop '{prop}' has an unknown type {type_name}");
        return Err(invalid(name, message));
    };

    let values = match spec.get("values") {
        None => None,
        Some(Value::Array(values)) => Some(values.clone()),
        Some(_) => {
            let message = format!("values of prop '{prop}' must be a list");
            return Err(invalid(name, message));
        }
    };
    Ok(PropSpec::Function(typed_prop(kind, spec.get("default").cloned(), values)))
}

/// Text of a value inside a template
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn computed_fn(value: Value) -> ComputedFn {
    match value {
        Value::String(body) => Arc::new(move |component: &Component| {
            Value::String(template::fill(&body, |path| component.get(path).map(value_text)))
        }),
        constant => Arc::new(move |_: &Component| constant.clone()),
    }
}

/// `{{ 0 }}`, `{{ 1 }}`... are the call arguments.
fn method_fn(body: String) -> MethodFn {
    Arc::new(move |component: &Component, args: &[Value]| {
        Value::String(template::fill(&body, |path| {
            let arg = path.parse::<usize>().ok().and_then(|i| args.get(i));
            arg.or_else(|| component.get(path)).map(value_text)
        }))
    })
}

fn pick_fn(keys: Vec<String>) -> ToArrayFn {
    Arc::new(move |component: &Component| {
        keys.iter()
            .map(|key| {
                let value = component.get(key).cloned().unwrap_or(Value::Null);
                (key.clone(), value)
            })
            .collect()
    })
}
