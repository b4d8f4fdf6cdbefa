use serde_json::{Map, Value};

use super::{
    extend, property_table, Field, FieldBase, FieldValue, HtmlValue, InputField, Marks, Nodes,
};
use crate::blueprint::{BlueprintResult, Node, NodeType, PropDecl, Props};
use crate::render::RenderContext;

/// Inline rich text editor
#[derive(Debug, Clone, PartialEq)]
pub struct WriterField {
    pub input: InputField,
    pub inline: bool,
    pub marks: Option<Marks>,
    pub nodes: Option<Nodes>,
    pub value: HtmlValue,
}

impl WriterField {
    pub const TYPE: &'static str = "writer";

    const OWN: &'static [PropDecl] = &[
        PropDecl::named("inline", NodeType::Bool),
        PropDecl::named("marks", NodeType::Marks),
        PropDecl::named("nodes", NodeType::Nodes),
    ];
}

impl Node for WriterField {
    const NODE: &'static str = "WriterField";

    fn properties() -> Vec<PropDecl> {
        property_table(&[Self::OWN, InputField::PROPERTIES, FieldBase::PROPERTIES])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        let inline = props.take_or("inline", false)?;
        let marks = props.take("marks")?;
        let nodes = props.take("nodes")?;
        let input = InputField::construct(props, Self::TYPE)?;
        let value = HtmlValue {
            required: input.required,
        };

        Ok(Self {
            input,
            inline,
            marks,
            nodes,
            value,
        })
    }

    fn defaults(&mut self) {
        self.marks.get_or_insert_with(Marks::default);
        self.nodes.get_or_insert_with(Nodes::default);
    }
}

impl Field for WriterField {
    fn base(&self) -> &FieldBase {
        &self.input.base
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let marks = self.marks.as_ref().map_or(Value::Null, Marks::render);
        let nodes = self.nodes.as_ref().map_or(Value::Null, Nodes::render);
        extend(
            self.input.render(ctx),
            [
                ("inline", self.inline.into()),
                ("marks", marks),
                ("nodes", nodes),
            ],
        )
    }

    fn value(&self) -> Option<&dyn FieldValue> {
        Some(&self.value)
    }
}
