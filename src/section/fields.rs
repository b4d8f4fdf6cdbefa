use serde_json::{Map, Value};

use super::{Section, SectionBase};
use crate::blueprint::{BlueprintResult, Node, NodeType, PropDecl, Props};
use crate::field::{extend, fields_from, property_table, Field};
use crate::render::RenderContext;

/// Form of fields editing the model's content
#[derive(Debug)]
pub struct FieldsSection {
    pub base: SectionBase,
    pub fields: Vec<Box<dyn Field>>,
}

impl FieldsSection {
    pub const TYPE: &'static str = "fields";

    const OWN: &'static [PropDecl] = &[PropDecl::named("fields", NodeType::Mixed)];

    pub fn field(&self, id: &str) -> Option<&dyn Field> {
        self.fields
            .iter()
            .find(|f| f.id() == id)
            .map(|f| f.as_ref())
    }
}

impl Node for FieldsSection {
    const NODE: &'static str = "FieldsSection";

    fn properties() -> Vec<PropDecl> {
        property_table(&[Self::OWN, SectionBase::PROPERTIES])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        let definitions: Option<Value> = props.take("fields")?;
        Ok(Self {
            fields: fields_from(definitions.unwrap_or(Value::Null))?,
            base: SectionBase::construct(props, Self::TYPE)?,
        })
    }
}

impl Section for FieldsSection {
    fn base(&self) -> &SectionBase {
        &self.base
    }

    /// Fields keyed by id
    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let fields = self
            .fields
            .iter()
            .map(|field| (field.id().to_string(), Value::Object(field.render(ctx))))
            .collect();

        extend(self.base.render(), [("fields", Value::Object(fields))])
    }

    fn fields(&self) -> &[Box<dyn Field>] {
        &self.fields
    }
}
