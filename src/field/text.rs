use serde_json::{Map, Value};

use super::{
    extend, property_table, render_text, take_count, Field, FieldBase, FieldValue, InputField,
    StringValue,
};
use crate::blueprint::{BlueprintResult, Node, NodeText, NodeType, PropDecl, Props};
use crate::render::RenderContext;

/// Single line text input
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub input: InputField,
    pub after: Option<NodeText>,
    pub before: Option<NodeText>,
    pub counter: bool,
    pub icon: Option<String>,
    pub maxlength: Option<usize>,
    pub minlength: Option<usize>,
    pub pattern: Option<String>,
    pub placeholder: Option<NodeText>,
    pub spellcheck: bool,
    pub value: StringValue,
}

impl TextField {
    pub const TYPE: &'static str = "text";

    const OWN: &'static [PropDecl] = &[
        PropDecl::named("after", NodeType::Text),
        PropDecl::named("before", NodeType::Text),
        PropDecl::named("counter", NodeType::Bool),
        PropDecl::named("icon", NodeType::String),
        PropDecl::named("maxlength", NodeType::Integer),
        PropDecl::named("minlength", NodeType::Integer),
        PropDecl::named("pattern", NodeType::String),
        PropDecl::named("placeholder", NodeType::Text),
        PropDecl::named("spellcheck", NodeType::Bool),
    ];
}

impl Node for TextField {
    const NODE: &'static str = "TextField";

    fn properties() -> Vec<PropDecl> {
        property_table(&[Self::OWN, InputField::PROPERTIES, FieldBase::PROPERTIES])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        let after = props.take("after")?;
        let before = props.take("before")?;
        let counter = props.take_or("counter", true)?;
        let icon = props.take("icon")?;
        let maxlength = take_count(props, "maxlength")?;
        let minlength = take_count(props, "minlength")?;
        let pattern = props.take("pattern")?;
        let placeholder = props.take("placeholder")?;
        let spellcheck = props.take_or("spellcheck", false)?;
        let input = InputField::construct(props, Self::TYPE)?;

        let value = StringValue {
            maxlength,
            minlength,
            required: input.required,
        };

        Ok(Self {
            input,
            after,
            before,
            counter,
            icon,
            maxlength,
            minlength,
            pattern,
            placeholder,
            spellcheck,
            value,
        })
    }
}

impl Field for TextField {
    fn base(&self) -> &FieldBase {
        &self.input.base
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        extend(
            self.input.render(ctx),
            [
                ("after", render_text(self.after.as_ref(), ctx)),
                ("before", render_text(self.before.as_ref(), ctx)),
                ("counter", self.counter.into()),
                ("icon", self.icon.clone().into()),
                ("maxlength", self.maxlength.into()),
                ("minlength", self.minlength.into()),
                ("pattern", self.pattern.clone().into()),
                ("placeholder", render_text(self.placeholder.as_ref(), ctx)),
                ("spellcheck", self.spellcheck.into()),
            ],
        )
    }

    fn value(&self) -> Option<&dyn FieldValue> {
        Some(&self.value)
    }
}
