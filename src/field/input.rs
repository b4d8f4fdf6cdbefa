use serde_json::{Map, Value};

use super::{extend, FieldBase};
use crate::blueprint::{BlueprintResult, NodeType, PropDecl, Props};
use crate::render::RenderContext;

/// Base of every field that stores a value
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub base: FieldBase,
    pub autofocus: bool,
    pub default: Option<Value>,
    pub disabled: bool,
    pub required: bool,
    pub translate: bool,
}

impl InputField {
    pub const PROPERTIES: &'static [PropDecl] = &[
        PropDecl::named("autofocus", NodeType::Bool),
        PropDecl::named("default", NodeType::Mixed),
        PropDecl::named("disabled", NodeType::Bool),
        PropDecl::named("required", NodeType::Bool),
        PropDecl::named("translate", NodeType::Bool),
    ];

    pub fn new(base: FieldBase) -> Self {
        Self {
            base,
            autofocus: false,
            default: None,
            disabled: false,
            required: false,
            translate: true,
        }
    }

    pub fn construct(props: &mut Props, field_type: &'static str) -> BlueprintResult<Self> {
        let base = FieldBase::construct(props, field_type)?;
        Ok(Self {
            base,
            autofocus: props.take_or("autofocus", false)?,
            default: props.take("default")?,
            disabled: props.take_or("disabled", false)?,
            required: props.take_or("required", false)?,
            translate: props.take_or("translate", true)?,
        })
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let default = match &self.default {
            Some(Value::String(template)) => Value::String(ctx.model.to_safe_string(template)),
            Some(value) => value.clone(),
            None => Value::Null,
        };

        extend(
            self.base.render(ctx),
            [
                ("autofocus", self.autofocus.into()),
                ("default", default),
                ("disabled", self.disabled.into()),
                ("required", self.required.into()),
                ("translate", self.translate.into()),
            ],
        )
    }
}
