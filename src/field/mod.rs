//! Blueprint fields
//!
//! Form controls of the Panel. Each field type is a blueprint node with a
//! layered property table: the type's own properties, then those of its
//! base (`InputField`, then `FieldBase`). Rendering follows the same
//! layering: a type renders its base and puts its own keys on top.
//!
//! ```text
//! FieldBase ─┬─ HeadlineField
//!            └─ InputField ─┬─ TextField
//!                           ├─ NumberField ── RangeField
//!                           ├─ BlocksField
//!                           └─ WriterField
//! ```

mod blocks;
mod headline;
mod input;
mod number;
mod prop;
mod text;
pub mod value;
mod writer;

pub use blocks::{BlockTypeGroup, BlockTypeGroups, BlocksField, DEFAULT_GROUP, DEFAULT_TYPES};
pub use headline::HeadlineField;
pub use input::InputField;
pub use number::{NumberField, RangeField};
pub use prop::{Marks, Nodes};
pub use text::TextField;
pub use value::{
    FieldValue, HtmlValue, JsonValue, NumberValue, StringValue, ValueError, ValueResult,
};
pub use writer::WriterField;

use std::fmt;

use serde_json::{Map, Value};

use crate::blueprint::{
    BlueprintError, BlueprintResult, Factory, NodeI18n, NodeProperty, NodeText, NodeType, PropDecl,
    Props,
};
use crate::render::RenderContext;

/// A field node of a blueprint
pub trait Field: fmt::Debug {
    fn base(&self) -> &FieldBase;

    fn id(&self) -> &str {
        &self.base().id
    }

    fn field_type(&self) -> &'static str {
        self.base().field_type
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value>;

    /// Validator for submitted values; display fields have none.
    fn value(&self) -> Option<&dyn FieldValue> {
        None
    }

    fn validate(&self, value: &Value) -> ValueResult<()> {
        match self.value() {
            Some(validator) => validator.validate(value),
            None => Ok(()),
        }
    }

    fn submit(&self, value: Value) -> ValueResult<Value> {
        match self.value() {
            Some(validator) => validator.submit(value),
            None => Ok(value),
        }
    }
}

/// Layer `own` on top of a base rendering.
///
/// Keys of `own` win; a key the base already has keeps its position.
pub fn extend<I>(mut base: Map<String, Value>, own: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    for (key, value) in own {
        base.insert(key.to_string(), value);
    }
    base
}

/// Field types known to [`field_from`]
pub const FIELD_TYPES: &[&str] = &[
    HeadlineField::TYPE,
    TextField::TYPE,
    NumberField::TYPE,
    RangeField::TYPE,
    BlocksField::TYPE,
    WriterField::TYPE,
];

/// Build a field from its blueprint definition.
///
/// `null` and `true` are shorthands for an empty definition; the type
/// defaults to the field id.
pub fn field_from(id: &str, definition: Value) -> BlueprintResult<Box<dyn Field>> {
    let mut props = match definition {
        Value::Null | Value::Bool(true) => Map::new(),
        Value::Object(map) => map,
        _ => {
            return Err(BlueprintError::invalid(
                "Field",
                format!("definition of '{id}' must be a map"),
            ))
        }
    };

    let kind = match props.get("type") {
        None | Some(Value::Null) => id.to_string(),
        Some(Value::String(kind)) => kind.clone(),
        Some(_) => return Err(BlueprintError::invalid_type("Field", "type", "string")),
    };
    props.insert("id".into(), Value::String(id.to_string()));
    props.insert("type".into(), Value::String(kind.clone()));

    Ok(match kind.as_str() {
        HeadlineField::TYPE => Box::new(Factory::make::<HeadlineField>(props)?),
        TextField::TYPE => Box::new(Factory::make::<TextField>(props)?),
        NumberField::TYPE => Box::new(Factory::make::<NumberField>(props)?),
        RangeField::TYPE => Box::new(Factory::make::<RangeField>(props)?),
        BlocksField::TYPE => Box::new(Factory::make::<BlocksField>(BlocksField::polyfill(props))?),
        WriterField::TYPE => Box::new(Factory::make::<WriterField>(props)?),
        _ => {
            return Err(BlueprintError::UnknownFieldType {
                id: id.to_string(),
                kind,
            })
        }
    })
}

/// Build every field of a `fields` map (or list of ids)
pub fn fields_from(definitions: Value) -> BlueprintResult<Vec<Box<dyn Field>>> {
    match definitions {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => map
            .into_iter()
            .map(|(id, definition)| field_from(&id, definition))
            .collect(),
        Value::Array(ids) => ids
            .into_iter()
            .map(|id| match id {
                Value::String(id) => field_from(&id, Value::Null),
                _ => Err(BlueprintError::invalid_type("Field", "fields", "list of field ids")),
            })
            .collect(),
        _ => Err(BlueprintError::invalid("Field", "fields must be a map")),
    }
}

/// Properties every field has
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBase {
    pub id: String,
    pub field_type: &'static str,
    pub label: Option<NodeI18n>,
    pub help: Option<NodeText>,
    pub width: Option<String>,
    pub when: Option<Map<String, Value>>,
}

impl FieldBase {
    pub const PROPERTIES: &'static [PropDecl] = &[
        PropDecl::named("id", NodeType::String),
        PropDecl::named("type", NodeType::String),
        PropDecl::named("label", NodeType::I18n),
        PropDecl::named("help", NodeType::Text),
        PropDecl::named("width", NodeType::String),
        PropDecl::named("when", NodeType::Map),
    ];

    pub fn new(id: impl Into<String>, field_type: &'static str) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: None,
            help: None,
            width: None,
            when: None,
        }
    }

    pub fn construct(props: &mut Props, field_type: &'static str) -> BlueprintResult<Self> {
        let id = props.require("id")?;
        let _declared: Option<String> = props.take("type")?;
        Ok(Self {
            id,
            field_type,
            label: props.take("label")?,
            help: props.take("help")?,
            width: props.take("width")?,
            when: props.take("when")?,
        })
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let mut field = Map::new();
        field.insert("help".into(), render_text(self.help.as_ref(), ctx));
        field.insert("id".into(), self.id.clone().into());
        field.insert(
            "label".into(),
            self.label.as_ref().and_then(|l| l.render(ctx)).into(),
        );
        field.insert("name".into(), self.id.clone().into());
        field.insert("type".into(), self.field_type.into());
        let width = self.width.clone().unwrap_or_else(|| "1/1".into());
        field.insert("width".into(), width.into());
        let when = self.when.clone().map_or(Value::Null, Value::Object);
        field.insert("when".into(), when);
        field
    }
}

pub(crate) fn render_text<N>(node: Option<&N>, ctx: &RenderContext<'_>) -> Value
where
    N: NodeProperty<Output = Option<String>>,
{
    node.and_then(|n| n.render(ctx))
        .map_or(Value::Null, Value::String)
}

/// Optional non-negative integer property
pub(crate) fn take_count(props: &mut Props, name: &str) -> BlueprintResult<Option<usize>> {
    let count: Option<i64> = props.take(name)?;
    count
        .map(|n| {
            usize::try_from(n)
                .map_err(|_| BlueprintError::invalid_type(props.node(), name, "positive integer"))
        })
        .transpose()
}

/// Concatenate property tables of a type and its bases
pub(crate) fn property_table(layers: &[&[PropDecl]]) -> Vec<PropDecl> {
    layers
        .iter()
        .flat_map(|layer| layer.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests;
