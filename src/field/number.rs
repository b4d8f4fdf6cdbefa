use serde_json::{Map, Value};

use super::{
    extend, property_table, render_text, Field, FieldBase, FieldValue, InputField, NumberValue,
};
use crate::blueprint::{BlueprintResult, Node, NodeText, NodeType, PropDecl, Props};
use crate::render::RenderContext;

/// Numeric input
#[derive(Debug, Clone, PartialEq)]
pub struct NumberField {
    pub input: InputField,
    pub after: Option<NodeText>,
    pub before: Option<NodeText>,
    pub icon: Option<String>,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub placeholder: Option<NodeText>,
    pub step: Option<f64>,
    pub value: NumberValue,
}

impl NumberField {
    pub const TYPE: &'static str = "number";

    const OWN: &'static [PropDecl] = &[
        PropDecl::named("after", NodeType::Text),
        PropDecl::named("before", NodeType::Text),
        PropDecl::named("icon", NodeType::String),
        PropDecl::named("max", NodeType::Number),
        PropDecl::named("min", NodeType::Number),
        PropDecl::named("placeholder", NodeType::Text),
        PropDecl::named("step", NodeType::Number),
    ];

    fn construct_as(props: &mut Props, field_type: &'static str) -> BlueprintResult<Self> {
        let after = props.take("after")?;
        let before = props.take("before")?;
        let icon = props.take("icon")?;
        let max = props.take("max")?;
        let min = props.take("min")?;
        let placeholder = props.take("placeholder")?;
        let step = props.take("step")?;
        let input = InputField::construct(props, field_type)?;

        let mut field = Self {
            input,
            after,
            before,
            icon,
            max,
            min,
            placeholder,
            step,
            value: NumberValue::default(),
        };
        field.sync_value();
        Ok(field)
    }

    fn sync_value(&mut self) {
        self.value = NumberValue {
            max: self.max,
            min: self.min,
            step: self.step,
            required: self.input.required,
        };
    }
}

impl Node for NumberField {
    const NODE: &'static str = "NumberField";

    fn properties() -> Vec<PropDecl> {
        property_table(&[Self::OWN, InputField::PROPERTIES, FieldBase::PROPERTIES])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        Self::construct_as(props, Self::TYPE)
    }
}

impl Field for NumberField {
    fn base(&self) -> &FieldBase {
        &self.input.base
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        extend(
            self.input.render(ctx),
            [
                ("after", render_text(self.after.as_ref(), ctx)),
                ("before", render_text(self.before.as_ref(), ctx)),
                ("icon", self.icon.clone().into()),
                ("max", self.max.into()),
                ("min", self.min.into()),
                ("placeholder", render_text(self.placeholder.as_ref(), ctx)),
                ("step", self.step.into()),
            ],
        )
    }

    fn value(&self) -> Option<&dyn FieldValue> {
        Some(&self.value)
    }
}

/// Slider over a bounded number
#[derive(Debug, Clone, PartialEq)]
pub struct RangeField {
    pub number: NumberField,
    pub tooltip: bool,
}

impl RangeField {
    pub const TYPE: &'static str = "range";

    pub const DEFAULT_MIN: f64 = 0.0;
    pub const DEFAULT_MAX: f64 = 100.0;

    const OWN: &'static [PropDecl] = &[PropDecl::named("tooltip", NodeType::Bool)];
}

impl Node for RangeField {
    const NODE: &'static str = "RangeField";

    fn properties() -> Vec<PropDecl> {
        property_table(&[
            Self::OWN,
            NumberField::OWN,
            InputField::PROPERTIES,
            FieldBase::PROPERTIES,
        ])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        Ok(Self {
            tooltip: props.take_or("tooltip", true)?,
            number: NumberField::construct_as(props, Self::TYPE)?,
        })
    }

    /// A range always has both bounds
    fn defaults(&mut self) {
        self.number.min.get_or_insert(Self::DEFAULT_MIN);
        self.number.max.get_or_insert(Self::DEFAULT_MAX);
        self.number.sync_value();
    }
}

impl Field for RangeField {
    fn base(&self) -> &FieldBase {
        self.number.base()
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        extend(self.number.render(ctx), [("tooltip", self.tooltip.into())])
    }

    fn value(&self) -> Option<&dyn FieldValue> {
        self.number.value()
    }
}
