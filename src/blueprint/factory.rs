//! Configuration normalizer
//!
//! Every blueprint node declares its properties in a table of
//! [`PropDecl`]s. The factory walks raw input, looks up each property's
//! declared [`NodeType`] and, when that type has a parsing function in the
//! conversion table ([`Factory`]), realizes the raw value into the
//! typed node. Values of built-in types pass through unchanged; the node's
//! `construct` is where a wrong built-in value is rejected.
//!
//! Realized values are never parsed again, so running the factory over its
//! own output is a no-op.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::{Map, Value};

use super::error::{BlueprintError, BlueprintResult};
use super::{Accept, BlueprintImage, ModelOption, NodeI18n, NodeKirbytext, NodeText, NodeUrl};
use crate::field::{BlockTypeGroups, Marks, Nodes};
use crate::section::{InfoSectionTheme, ItemSize, Layout};

/// Parsing function for one node type
pub type FactoryFn = fn(Value) -> BlueprintResult<Prop>;

/// Declared type of a blueprint property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    String,
    Bool,
    Integer,
    Number,
    List,
    Map,
    Mixed,
    I18n,
    Text,
    Kirbytext,
    Url,
    Image,
    ModelOption,
    Accept,
    Marks,
    Nodes,
    BlockTypes,
    Theme,
    Layout,
    Size,
}

impl NodeType {
    pub const ALL: &'static [NodeType] = &[
        NodeType::String,
        NodeType::Bool,
        NodeType::Integer,
        NodeType::Number,
        NodeType::List,
        NodeType::Map,
        NodeType::Mixed,
        NodeType::I18n,
        NodeType::Text,
        NodeType::Kirbytext,
        NodeType::Url,
        NodeType::Image,
        NodeType::ModelOption,
        NodeType::Accept,
        NodeType::Marks,
        NodeType::Nodes,
        NodeType::BlockTypes,
        NodeType::Theme,
        NodeType::Layout,
        NodeType::Size,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NodeType::String => "string",
            NodeType::Bool => "bool",
            NodeType::Integer => "integer",
            NodeType::Number => "number",
            NodeType::List => "list",
            NodeType::Map => "map",
            NodeType::Mixed => "mixed",
            NodeType::I18n => "NodeI18n",
            NodeType::Text => "NodeText",
            NodeType::Kirbytext => "NodeKirbytext",
            NodeType::Url => "NodeUrl",
            NodeType::Image => "BlueprintImage",
            NodeType::ModelOption => "ModelOption",
            NodeType::Accept => "Accept",
            NodeType::Marks => "Marks",
            NodeType::Nodes => "Nodes",
            NodeType::BlockTypes => "BlockTypeGroups",
            NodeType::Theme => "InfoSectionTheme",
            NodeType::Layout => "Layout",
            NodeType::Size => "ItemSize",
        }
    }

    /// Default parsing function for node types, `None` for
    /// built-in value types.
    pub fn factory(&self) -> Option<FactoryFn> {
        match self {
            NodeType::String
            | NodeType::Bool
            | NodeType::Integer
            | NodeType::Number
            | NodeType::List
            | NodeType::Map
            | NodeType::Mixed => None,
            NodeType::I18n => Some(realize_i18n),
            NodeType::Text => Some(realize_text),
            NodeType::Kirbytext => Some(realize_kirbytext),
            NodeType::Url => Some(realize_url),
            NodeType::Image => Some(realize_image),
            NodeType::ModelOption => Some(realize_model_option),
            NodeType::Accept => Some(realize_accept),
            NodeType::Marks => Some(realize_marks),
            NodeType::Nodes => Some(realize_nodes),
            NodeType::BlockTypes => Some(realize_block_types),
            NodeType::Theme => Some(realize_theme),
            NodeType::Layout => Some(realize_layout),
            NodeType::Size => Some(realize_size),
        }
    }
}

fn realize_i18n(value: Value) -> BlueprintResult<Prop> {
    Ok(NodeI18n::factory(value)?.map_or(Prop::Absent, Prop::I18n))
}

fn realize_text(value: Value) -> BlueprintResult<Prop> {
    Ok(NodeText::factory(value)?.map_or(Prop::Absent, Prop::Text))
}

fn realize_kirbytext(value: Value) -> BlueprintResult<Prop> {
    let text = NodeKirbytext::factory(value)?;
    Ok(text.map_or(Prop::Absent, Prop::Kirbytext))
}

fn realize_url(value: Value) -> BlueprintResult<Prop> {
    NodeUrl::factory(value).map(Prop::Url)
}

fn realize_image(value: Value) -> BlueprintResult<Prop> {
    BlueprintImage::factory(value).map(Prop::Image)
}

fn realize_model_option(value: Value) -> BlueprintResult<Prop> {
    ModelOption::factory(value).map(Prop::Option)
}

fn realize_accept(value: Value) -> BlueprintResult<Prop> {
    Accept::factory(value).map(Prop::Accept)
}

fn realize_marks(value: Value) -> BlueprintResult<Prop> {
    Marks::factory(value).map(Prop::Marks)
}

fn realize_nodes(value: Value) -> BlueprintResult<Prop> {
    Nodes::factory(value).map(Prop::Nodes)
}

fn realize_block_types(value: Value) -> BlueprintResult<Prop> {
    BlockTypeGroups::factory(value).map(Prop::BlockTypes)
}

fn realize_theme(value: Value) -> BlueprintResult<Prop> {
    InfoSectionTheme::factory(value).map(Prop::Theme)
}

fn realize_layout(value: Value) -> BlueprintResult<Prop> {
    Layout::factory(value).map(Prop::Layout)
}

fn realize_size(value: Value) -> BlueprintResult<Prop> {
    ItemSize::factory(value).map(Prop::Size)
}

/// A property's declared type: one type, or a union of types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    Named(NodeType),
    /// Only the first member is consulted for a factory.
    Union(&'static [NodeType]),
}

/// One row of a node's property table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropDecl {
    pub name: &'static str,
    pub ty: PropType,
}

impl PropDecl {
    pub const fn named(name: &'static str, ty: NodeType) -> Self {
        Self {
            name,
            ty: PropType::Named(ty),
        }
    }

    pub const fn union(name: &'static str, types: &'static [NodeType]) -> Self {
        Self {
            name,
            ty: PropType::Union(types),
        }
    }
}

/// A property value, either still raw or already realized into its node
#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    Raw(Value),
    /// A factory ran and produced "no node" (e.g. `label: false`)
    Absent,
    I18n(NodeI18n),
    Text(NodeText),
    Kirbytext(NodeKirbytext),
    Url(NodeUrl),
    Image(BlueprintImage),
    Option(ModelOption),
    Accept(Accept),
    Marks(Marks),
    Nodes(Nodes),
    BlockTypes(BlockTypeGroups),
    Theme(InfoSectionTheme),
    Layout(Layout),
    Size(ItemSize),
}

impl Prop {
    /// Node type of a realized value; `None` for raw values
    pub fn node_type(&self) -> Option<NodeType> {
        Some(match self {
            Prop::Raw(_) | Prop::Absent => return None,
            Prop::I18n(_) => NodeType::I18n,
            Prop::Text(_) => NodeType::Text,
            Prop::Kirbytext(_) => NodeType::Kirbytext,
            Prop::Url(_) => NodeType::Url,
            Prop::Image(_) => NodeType::Image,
            Prop::Option(_) => NodeType::ModelOption,
            Prop::Accept(_) => NodeType::Accept,
            Prop::Marks(_) => NodeType::Marks,
            Prop::Nodes(_) => NodeType::Nodes,
            Prop::BlockTypes(_) => NodeType::BlockTypes,
            Prop::Theme(_) => NodeType::Theme,
            Prop::Layout(_) => NodeType::Layout,
            Prop::Size(_) => NodeType::Size,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Prop::Absent | Prop::Raw(Value::Null))
    }

    pub fn is_realized(&self) -> bool {
        self.node_type().is_some()
    }
}

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        Prop::Raw(value)
    }
}

/// Conversion from a property value into a constructor argument
pub trait FromProp: Sized {
    /// Type name used in error messages
    const EXPECTED: &'static str;

    fn from_prop(prop: Prop) -> Result<Self, Prop>;
}

impl FromProp for String {
    const EXPECTED: &'static str = "string";

    fn from_prop(prop: Prop) -> Result<Self, Prop> {
        match prop {
            Prop::Raw(Value::String(s)) => Ok(s),
            other => Err(other),
        }
    }
}

impl FromProp for bool {
    const EXPECTED: &'static str = "bool";

    fn from_prop(prop: Prop) -> Result<Self, Prop> {
        match prop {
            Prop::Raw(Value::Bool(b)) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromProp for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_prop(prop: Prop) -> Result<Self, Prop> {
        match prop {
            Prop::Raw(Value::Number(n)) if n.is_i64() || n.is_u64() => n
                .as_i64()
                .ok_or(Prop::Raw(Value::Number(n))),
            other => Err(other),
        }
    }
}

impl FromProp for f64 {
    const EXPECTED: &'static str = "number";

    fn from_prop(prop: Prop) -> Result<Self, Prop> {
        match prop {
            Prop::Raw(Value::Number(n)) => n.as_f64().ok_or(Prop::Raw(Value::Number(n))),
            other => Err(other),
        }
    }
}

impl FromProp for Value {
    const EXPECTED: &'static str = "value";

    fn from_prop(prop: Prop) -> Result<Self, Prop> {
        match prop {
            Prop::Raw(value) => Ok(value),
            other => Err(other),
        }
    }
}

impl FromProp for Map<String, Value> {
    const EXPECTED: &'static str = "map";

    fn from_prop(prop: Prop) -> Result<Self, Prop> {
        match prop {
            Prop::Raw(Value::Object(map)) => Ok(map),
            other => Err(other),
        }
    }
}

impl FromProp for Vec<String> {
    const EXPECTED: &'static str = "list of strings";

    fn from_prop(prop: Prop) -> Result<Self, Prop> {
        match prop {
            Prop::Raw(Value::Array(items)) => {
                if items.iter().all(Value::is_string) {
                    Ok(items
                        .into_iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect())
                } else {
                    Err(Prop::Raw(Value::Array(items)))
                }
            }
            Prop::Raw(Value::String(s)) => Ok(vec![s]),
            other => Err(other),
        }
    }
}

macro_rules! from_realized {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl FromProp for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_prop(prop: Prop) -> Result<Self, Prop> {
                    match prop {
                        Prop::$variant(node) => Ok(node),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

from_realized! {
    I18n => NodeI18n,
    Text => NodeText,
    Kirbytext => NodeKirbytext,
    Url => NodeUrl,
    Image => BlueprintImage,
    Option => ModelOption,
    Accept => Accept,
    Marks => Marks,
    Nodes => Nodes,
    BlockTypes => BlockTypeGroups,
    Theme => InfoSectionTheme,
    Layout => Layout,
    Size => ItemSize,
}

/// Realized constructor arguments for one node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    node: &'static str,
    entries: Vec<(String, Prop)>,
}

impl Props {
    pub fn new(node: &'static str) -> Self {
        Self {
            node,
            entries: Vec::new(),
        }
    }

    pub fn node(&self) -> &'static str {
        self.node
    }

    /// Insert or replace a property, keeping its first position
    pub fn insert(&mut self, name: impl Into<String>, prop: Prop) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = prop,
            None => self.entries.push((name, prop)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Prop> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, Prop)> {
        self.entries
    }

    /// Remove a property and convert it; absent or null values are `None`.
    pub fn take<T: FromProp>(&mut self, name: &str) -> BlueprintResult<Option<T>> {
        let Some(pos) = self.entries.iter().position(|(n, _)| n == name) else {
            return Ok(None);
        };
        let (_, prop) = self.entries.remove(pos);
        if prop.is_null() {
            return Ok(None);
        }
        T::from_prop(prop)
            .map(Some)
            .map_err(|_| BlueprintError::invalid_type(self.node, name, T::EXPECTED))
    }

    pub fn take_or<T: FromProp>(&mut self, name: &str, default: T) -> BlueprintResult<T> {
        Ok(self.take(name)?.unwrap_or(default))
    }

    pub fn require<T: FromProp>(&mut self, name: &str) -> BlueprintResult<T> {
        self.take(name)?.ok_or_else(|| BlueprintError::MissingProperty {
            node: self.node,
            property: name.to_string(),
        })
    }
}

/// A blueprint node built from a property table
pub trait Node: Sized {
    /// Node name used in error messages
    const NODE: &'static str;

    fn properties() -> Vec<PropDecl>;

    /// Build the node, taking the properties it owns out of `props`.
    fn construct(props: &mut Props) -> BlueprintResult<Self>;

    /// Fill in defaults that depend on other properties
    fn defaults(&mut self) {}
}

/// Conversion table from node type to parsing function
#[derive(Clone)]
pub struct Factory {
    table: HashMap<NodeType, FactoryFn>,
}

impl Default for Factory {
    fn default() -> Self {
        let table = NodeType::ALL
            .iter()
            .filter_map(|ty| ty.factory().map(|f| (*ty, f)))
            .collect();
        Self { table }
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&str> = self.table.keys().map(NodeType::name).collect();
        types.sort_unstable();
        f.debug_struct("Factory").field("types", &types).finish()
    }
}

static SHARED: OnceLock<Factory> = OnceLock::new();

impl Factory {
    /// The default table, built once
    pub fn shared() -> &'static Factory {
        SHARED.get_or_init(Factory::default)
    }

    /// Replace the parsing function of a node type, returning the old one.
    pub fn register(&mut self, ty: NodeType, factory: FactoryFn) -> Option<FactoryFn> {
        self.table.insert(ty, factory)
    }

    pub fn has_factory(&self, ty: NodeType) -> bool {
        self.table.contains_key(&ty)
    }

    pub fn realize(&self, ty: NodeType, value: Value) -> BlueprintResult<Prop> {
        match self.table.get(&ty) {
            Some(factory) => factory(value),
            None => Ok(Prop::Raw(value)),
        }
    }

    /// Only the first member of a union is consulted.
    pub fn realize_union(&self, types: &[NodeType], value: Value) -> BlueprintResult<Prop> {
        match types.first() {
            Some(first) => self.realize(*first, value),
            None => Ok(Prop::Raw(value)),
        }
    }

    /// Realize one value according to its declaration.
    ///
    /// Null and already realized values are returned untouched.
    pub fn property(&self, decl: Option<&PropDecl>, prop: Prop) -> BlueprintResult<Prop> {
        let value = match prop {
            Prop::Raw(Value::Null) | Prop::Absent => return Ok(prop),
            Prop::Raw(value) => value,
            realized => return Ok(realized),
        };

        match decl.map(|d| d.ty) {
            None => Ok(Prop::Raw(value)),
            Some(PropType::Named(ty)) => self.realize(ty, value),
            Some(PropType::Union(types)) => self.realize_union(types, value),
        }
    }

    /// Realize every entry; names missing from `table` are rejected.
    pub fn properties<I>(
        &self,
        node: &'static str,
        table: &[PropDecl],
        entries: I,
    ) -> BlueprintResult<Props>
    where
        I: IntoIterator<Item = (String, Prop)>,
    {
        let mut props = Props::new(node);
        for (name, prop) in entries {
            let Some(decl) = table.iter().find(|d| d.name == name) else {
                return Err(BlueprintError::UnknownProperty {
                    node,
                    property: name,
                });
            };
            let realized = self.property(Some(decl), prop)?;
            props.insert(name, realized);
        }
        Ok(props)
    }

    /// Realize only the listed properties.
    ///
    /// Absent, null and already matching values are skipped.
    pub fn apply_to(
        &self,
        mut props: Props,
        factories: &[(&str, NodeType)],
    ) -> BlueprintResult<Props> {
        for (name, ty) in factories {
            let Some(current) = props.get(name) else {
                continue;
            };
            if current.is_null() || current.node_type() == Some(*ty) {
                continue;
            }
            let Prop::Raw(value) = current.clone() else {
                continue;
            };
            let realized = self.realize(*ty, value)?;
            props.insert(*name, realized);
        }
        Ok(props)
    }

    /// Realize, construct and apply defaults.
    pub fn build<T, I>(&self, entries: I) -> BlueprintResult<T>
    where
        T: Node,
        I: IntoIterator<Item = (String, Prop)>,
    {
        let mut props = self.properties(T::NODE, &T::properties(), entries)?;
        let mut node = T::construct(&mut props)?;
        node.defaults();
        Ok(node)
    }

    pub fn for_named_type(ty: NodeType, value: Value) -> BlueprintResult<Prop> {
        Self::shared().realize(ty, value)
    }

    pub fn for_union_type(types: &[NodeType], value: Value) -> BlueprintResult<Prop> {
        Self::shared().realize_union(types, value)
    }

    pub fn for_property(decl: Option<&PropDecl>, prop: Prop) -> BlueprintResult<Prop> {
        Self::shared().property(decl, prop)
    }

    pub fn for_properties<I>(
        node: &'static str,
        table: &[PropDecl],
        entries: I,
    ) -> BlueprintResult<Props>
    where
        I: IntoIterator<Item = (String, Prop)>,
    {
        Self::shared().properties(node, table, entries)
    }

    pub fn apply(props: Props, factories: &[(&str, NodeType)]) -> BlueprintResult<Props> {
        Self::shared().apply_to(props, factories)
    }

    pub fn make<T: Node>(raw: Map<String, Value>) -> BlueprintResult<T> {
        Self::make_from(raw.into_iter().map(|(k, v)| (k, Prop::Raw(v))))
    }

    pub fn make_from<T, I>(entries: I) -> BlueprintResult<T>
    where
        T: Node,
        I: IntoIterator<Item = (String, Prop)>,
    {
        Self::shared().build(entries)
    }
}
