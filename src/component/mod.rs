//! Dynamic components
//!
//! A component is built from a registered definition and caller attributes:
//! props are resolved first (in declaration order), then computed values.
//! Names are looked up through explicit slots instead of field access.
//!
//! - `definition` - compiled definitions and prop types
//! - `registry` - definition sources, `extends` and mixin merging
//! - `error` - `ComponentError`, `PropError`

mod definition;
mod error;
mod registry;

use std::sync::Arc;

use serde_json::{Map, Value};

pub use definition::{
    typed_prop, ComputedFn, Definition, MethodFn, PropFn, PropSpec, PropType, ToArrayFn,
};
pub use error::{ComponentError, ComponentResult, PropError};
pub use registry::{ComponentRegistry, MIXINS_DIR};

/// Where a name resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Computed,
    Prop,
    Method,
    Attr,
}

#[derive(Debug, Clone)]
pub struct Component {
    component_type: String,
    attrs: Map<String, Value>,
    props: Map<String, Value>,
    computed: Map<String, Value>,
    definition: Arc<Definition>,
}

impl Component {
    /// Build a component of a registered type.
    pub fn new(
        registry: &ComponentRegistry,
        component_type: &str,
        attrs: Map<String, Value>,
    ) -> ComponentResult<Self> {
        if !registry.has_type(component_type)? {
            return Err(ComponentError::UndefinedType(component_type.to_string()));
        }
        let options = registry.setup(component_type)?;
        let definition = Definition::from_value(component_type, options)?;
        Self::from_definition(component_type, definition, attrs)
    }

    pub fn from_definition(
        component_type: impl Into<String>,
        definition: Definition,
        attrs: Map<String, Value>,
    ) -> ComponentResult<Self> {
        let mut component = Self {
            component_type: component_type.into(),
            attrs,
            props: Map::new(),
            computed: Map::new(),
            definition: Arc::new(definition),
        };
        component.apply_props()?;
        component.apply_computed();
        tracing::trace!(component = %component.component_type, "component ready");
        Ok(component)
    }

    fn apply_props(&mut self) -> ComponentResult<()> {
        let definition = Arc::clone(&self.definition);
        for (name, spec) in &definition.props {
            self.props.remove(name);
            let value = match spec {
                PropSpec::Value(value) => value.clone(),
                PropSpec::Function(f) => {
                    let attr = self.attrs.get(name).filter(|v| !v.is_null());
                    f(self, attr).map_err(|e| e.for_prop(name))?
                }
            };
            self.props.insert(name.clone(), value);
        }
        Ok(())
    }

    fn apply_computed(&mut self) {
        let definition = Arc::clone(&self.definition);
        for (name, _) in &definition.computed {
            self.apply_computed_prop(name);
        }
    }

    fn apply_computed_prop(&mut self, name: &str) {
        // stale value must not be visible to the function
        self.computed.remove(name);
        let definition = Arc::clone(&self.definition);
        if let Some((_, f)) = definition.computed.iter().find(|(n, _)| n == name) {
            let value = f(self);
            self.computed.insert(name.to_string(), value);
        }
    }

    /// Recompute one computed value; `None` if no such computed prop.
    pub fn recompute(&mut self, name: &str) -> Option<&Value> {
        self.apply_computed_prop(name);
        self.computed.get(name)
    }

    pub fn component_type(&self) -> &str {
        &self.component_type
    }

    pub fn attrs(&self) -> &Map<String, Value> {
        &self.attrs
    }

    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    pub fn computed(&self) -> &Map<String, Value> {
        &self.computed
    }

    /// Merged definition options
    pub fn options(&self) -> &Map<String, Value> {
        &self.definition.options
    }

    /// Slot `name` resolves to when called
    pub fn slot(&self, name: &str) -> Option<Slot> {
        if self.computed.contains_key(name) {
            Some(Slot::Computed)
        } else if self.props.contains_key(name) {
            Some(Slot::Prop)
        } else if self.definition.methods.iter().any(|(n, _)| n == name) {
            Some(Slot::Method)
        } else if self.attrs.contains_key(name) {
            Some(Slot::Attr)
        } else {
            None
        }
    }

    /// Computed, then prop, then attribute
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.computed
            .get(name)
            .or_else(|| self.props.get(name))
            .or_else(|| self.attrs.get(name))
    }

    /// Computed, then prop, then method (called with `args`), then attribute
    pub fn call(&self, name: &str, args: &[Value]) -> Option<Value> {
        match self.slot(name)? {
            Slot::Method => self
                .definition
                .methods
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, f)| f(self, args)),
            _ => self.get(name).cloned(),
        }
    }

    /// Whether `get` finds a value; methods do not count
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attributes, props and computed values (later wins), keys sorted
    pub fn to_array(&self) -> Map<String, Value> {
        if let Some(to_array) = &self.definition.to_array {
            return to_array(self);
        }

        let mut entries: Vec<(&String, &Value)> = self
            .attrs
            .iter()
            .chain(&self.props)
            .chain(&self.computed)
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut array = Map::new();
        for (key, value) in entries {
            array.insert(key.clone(), value.clone());
        }
        array
    }
}

#[cfg(test)]
mod tests;
