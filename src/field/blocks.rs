//! Blocks field and its block type groups

use std::borrow::Cow;

use serde_json::{Map, Value};

use super::{
    extend, property_table, render_text, take_count, Field, FieldBase, FieldValue, InputField,
    JsonValue,
};
use crate::blueprint::{BlueprintError, BlueprintResult, Node, NodeText, NodeType, PropDecl, Props};
use crate::render::RenderContext;

/// Default group name
pub const DEFAULT_GROUP: &str = "blocks";

/// Block types available without configuration
pub const DEFAULT_TYPES: &[&str] = &[
    "code", "gallery", "heading", "image", "line", "list", "markdown", "quote", "text", "video",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTypeGroup {
    pub name: String,
    pub label: Option<String>,
    pub open: bool,
    pub types: Vec<String>,
}

impl BlockTypeGroup {
    pub fn render(&self) -> Value {
        let mut group = Map::new();
        group.insert("name".into(), self.name.clone().into());
        group.insert("label".into(), self.label.clone().into());
        group.insert("open".into(), self.open.into());
        group.insert("types".into(), self.types.clone().into());
        Value::Object(group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTypeGroups {
    pub groups: Vec<BlockTypeGroup>,
}

impl Default for BlockTypeGroups {
    fn default() -> Self {
        Self::single(DEFAULT_TYPES.iter().map(|t| t.to_string()).collect())
    }
}

impl BlockTypeGroups {
    fn single(types: Vec<String>) -> Self {
        Self {
            groups: vec![BlockTypeGroup {
                name: DEFAULT_GROUP.to_string(),
                label: None,
                open: true,
                types,
            }],
        }
    }

    /// - list of type names: one default group
    /// - map of group name to `{label, open, types}` (or a plain list)
    pub fn factory(value: Value) -> BlueprintResult<Self> {
        match value {
            Value::Null | Value::Bool(true) => Ok(Self::default()),
            Value::Array(items) => type_names(items).map(Self::single),
            Value::Object(groups) => groups
                .into_iter()
                .map(|(name, group)| group_from(name, group))
                .collect::<BlueprintResult<Vec<_>>>()
                .map(|groups| Self { groups }),
            _ => Err(BlueprintError::invalid(
                "BlockTypeGroups",
                "expected a list of block types or a map of groups",
            )),
        }
    }

    /// Every block type of every group, in order
    pub fn types(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.types.iter().map(String::as_str))
            .collect()
    }

    pub fn render(&self) -> Value {
        Value::Array(self.groups.iter().map(BlockTypeGroup::render).collect())
    }
}

fn type_names(items: Vec<Value>) -> BlueprintResult<Vec<String>> {
    items
        .into_iter()
        .map(|item| match item {
            Value::String(name) => Ok(name),
            _ => Err(BlueprintError::invalid_type("BlockTypeGroups", "types", "list of strings")),
        })
        .collect()
}

fn group_from(name: String, group: Value) -> BlueprintResult<BlockTypeGroup> {
    const NODE: &str = "BlockTypeGroup";
    match group {
        Value::Array(items) => Ok(BlockTypeGroup {
            name,
            label: None,
            open: true,
            types: type_names(items)?,
        }),
        Value::Object(mut settings) => {
            let label = match settings.remove("label") {
                None | Some(Value::Null) => None,
                Some(Value::String(label)) => Some(label),
                Some(_) => return Err(BlueprintError::invalid_type(NODE, "label", "string")),
            };
            let open = match settings.remove("open") {
                None | Some(Value::Null) => true,
                Some(Value::Bool(open)) => open,
                Some(_) => return Err(BlueprintError::invalid_type(NODE, "open", "bool")),
            };
            let types = settings.remove("types");
            let types = match types.or_else(|| settings.remove("fieldsets")) {
                Some(Value::Array(items)) => type_names(items)?,
                None | Some(Value::Null) => Vec::new(),
                Some(_) => {
                    let expected = "list of strings";
                    return Err(BlueprintError::invalid_type(NODE, "types", expected));
                }
            };
            if let Some((unknown, _)) = settings.into_iter().next() {
                return Err(BlueprintError::UnknownProperty {
                    node: NODE,
                    property: unknown,
                });
            }
            Ok(BlockTypeGroup {
                name,
                label,
                open,
                types,
            })
        }
        _ => Err(BlueprintError::invalid(NODE, "expected a list or a map")),
    }
}

/// Editor for a list of typed content blocks
#[derive(Debug, Clone, PartialEq)]
pub struct BlocksField {
    pub input: InputField,
    pub empty: Option<NodeText>,
    pub group: String,
    pub max: Option<usize>,
    pub min: Option<usize>,
    pub pretty: bool,
    pub types: Option<BlockTypeGroups>,
    pub value: JsonValue,
}

impl BlocksField {
    pub const TYPE: &'static str = "blocks";

    const OWN: &'static [PropDecl] = &[
        PropDecl::named("empty", NodeType::Text),
        PropDecl::named("group", NodeType::String),
        PropDecl::named("max", NodeType::Integer),
        PropDecl::named("min", NodeType::Integer),
        PropDecl::named("pretty", NodeType::Bool),
        PropDecl::named("types", NodeType::BlockTypes),
    ];

    /// Legacy `fieldsets` become `types`
    pub fn polyfill(mut props: Map<String, Value>) -> Map<String, Value> {
        if let Some(fieldsets) = props.remove("fieldsets") {
            props.entry("types").or_insert(fieldsets);
        }
        props
    }

    /// Configured groups, or the default groups
    pub fn types(&self) -> Cow<'_, BlockTypeGroups> {
        match &self.types {
            Some(types) => Cow::Borrowed(types),
            None => Cow::Owned(BlockTypeGroups::default()),
        }
    }
}

impl Node for BlocksField {
    const NODE: &'static str = "BlocksField";

    fn properties() -> Vec<PropDecl> {
        property_table(&[Self::OWN, InputField::PROPERTIES, FieldBase::PROPERTIES])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        let empty = props.take("empty")?;
        let group = props.take_or("group", DEFAULT_GROUP.to_string())?;
        let max = take_count(props, "max")?;
        let min = take_count(props, "min")?;
        let pretty = props.take_or("pretty", false)?;
        let types = props.take("types")?;
        let input = InputField::construct(props, Self::TYPE)?;

        let value = JsonValue {
            max,
            min,
            pretty,
            required: input.required,
        };

        Ok(Self {
            input,
            empty,
            group,
            max,
            min,
            pretty,
            types,
            value,
        })
    }
}

impl Field for BlocksField {
    fn base(&self) -> &FieldBase {
        &self.input.base
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        extend(
            self.input.render(ctx),
            [
                ("empty", render_text(self.empty.as_ref(), ctx)),
                ("group", self.group.clone().into()),
                ("max", self.max.into()),
                ("min", self.min.into()),
            ],
        )
    }

    fn value(&self) -> Option<&dyn FieldValue> {
        Some(&self.value)
    }
}
