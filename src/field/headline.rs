use serde_json::{Map, Value};

use super::{extend, property_table, Field, FieldBase};
use crate::blueprint::{BlueprintResult, Node, NodeType, PropDecl, Props};
use crate::render::RenderContext;

/// Display-only heading between fields
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineField {
    pub base: FieldBase,
    pub numbered: bool,
}

impl HeadlineField {
    pub const TYPE: &'static str = "headline";

    const OWN: &'static [PropDecl] = &[PropDecl::named("numbered", NodeType::Bool)];
}

impl Node for HeadlineField {
    const NODE: &'static str = "HeadlineField";

    fn properties() -> Vec<PropDecl> {
        property_table(&[Self::OWN, FieldBase::PROPERTIES])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        Ok(Self {
            numbered: props.take_or("numbered", true)?,
            base: FieldBase::construct(props, Self::TYPE)?,
        })
    }
}

impl Field for HeadlineField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        extend(self.base.render(ctx), [("numbered", self.numbered.into())])
    }
}
