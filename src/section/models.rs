use serde_json::{Map, Value};

use super::{Section, SectionBase};
use crate::blueprint::{
    enum_property, BlueprintImage, BlueprintResult, Node, NodeI18n, NodeProperty, NodeText,
    NodeType, PropDecl, Property, Props,
};
use crate::field::{extend, property_table};
use crate::render::RenderContext;

enum_property! {
    /// How a section lists its models
    Layout {
        List => "list",
        Cardlets => "cardlets",
        Cards => "cards",
        Table => "table",
    }
}

enum_property! {
    /// Card size of list items
    ItemSize {
        Tiny => "tiny",
        Small => "small",
        Medium => "medium",
        Large => "large",
        Huge => "huge",
        Full => "full",
    }
}

/// Base of sections listing pages or files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelsSection {
    pub base: SectionBase,
    pub columns: Option<Map<String, Value>>,
    pub empty: Option<NodeText>,
    pub help: Option<NodeText>,
    pub image: Option<BlueprintImage>,
    pub info: Option<NodeText>,
    pub label: Option<NodeI18n>,
    pub layout: Option<Layout>,
    pub parent: Option<String>,
    pub size: Option<ItemSize>,
    pub text: Option<NodeText>,
}

impl ModelsSection {
    pub const PROPERTIES: &'static [PropDecl] = &[
        PropDecl::named("columns", NodeType::Map),
        PropDecl::named("empty", NodeType::Text),
        PropDecl::named("help", NodeType::Text),
        PropDecl::named("image", NodeType::Image),
        PropDecl::named("info", NodeType::Text),
        PropDecl::named("label", NodeType::I18n),
        PropDecl::named("layout", NodeType::Layout),
        PropDecl::named("parent", NodeType::String),
        PropDecl::named("size", NodeType::Size),
        PropDecl::named("text", NodeType::Text),
    ];

    pub fn new(id: impl Into<String>, section_type: &'static str) -> Self {
        Self {
            base: SectionBase {
                id: id.into(),
                section_type,
            },
            ..Self::default()
        }
    }

    pub fn construct(props: &mut Props, section_type: &'static str) -> BlueprintResult<Self> {
        Ok(Self {
            columns: props.take("columns")?,
            empty: props.take("empty")?,
            help: props.take("help")?,
            image: props.take("image")?,
            info: props.take("info")?,
            label: props.take("label")?,
            layout: props.take("layout")?,
            parent: props.take("parent")?,
            size: props.take("size")?,
            text: props.take("text")?,
            base: SectionBase::construct(props, section_type)?,
        })
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let text = |node: &Option<NodeText>| -> Value {
            node.as_ref().and_then(|n| n.render(ctx)).into()
        };
        let columns = self.columns.clone().map_or(Value::Null, Value::Object);
        let image = self.image.as_ref();
        let label = self.label.as_ref().and_then(|l| l.render(ctx));
        let layout = self.layout.as_ref().map_or(Value::Null, Property::value);
        let size = self.size.as_ref().map_or(Value::Null, Property::value);

        extend(
            self.base.render(),
            [
                ("columns", columns),
                ("empty", text(&self.empty)),
                ("help", text(&self.help)),
                ("image", image.map_or(Value::Null, |i| i.render_value(ctx))),
                ("info", text(&self.info)),
                ("label", label.into()),
                ("layout", layout),
                ("parent", self.parent.clone().into()),
                ("size", size),
                ("text", text(&self.text)),
            ],
        )
    }
}

/// Files of the parent model
#[derive(Debug, Clone, PartialEq)]
pub struct FilesSection {
    pub models: ModelsSection,
    pub template: Option<String>,
}

impl FilesSection {
    pub const TYPE: &'static str = "files";

    const OWN: &'static [PropDecl] = &[PropDecl::named("template", NodeType::String)];
}

impl Node for FilesSection {
    const NODE: &'static str = "FilesSection";

    fn properties() -> Vec<PropDecl> {
        property_table(&[
            Self::OWN,
            ModelsSection::PROPERTIES,
            SectionBase::PROPERTIES,
        ])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        Ok(Self {
            template: props.take("template")?,
            models: ModelsSection::construct(props, Self::TYPE)?,
        })
    }
}

impl Section for FilesSection {
    fn base(&self) -> &SectionBase {
        &self.models.base
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        extend(
            self.models.render(ctx),
            [("template", self.template.clone().into())],
        )
    }
}

/// Child pages of the parent model
#[derive(Debug, Clone, PartialEq)]
pub struct PagesSection {
    pub models: ModelsSection,
    pub status: Option<String>,
    pub templates: Option<Vec<String>>,
}

impl PagesSection {
    pub const TYPE: &'static str = "pages";

    const OWN: &'static [PropDecl] = &[
        PropDecl::named("status", NodeType::String),
        PropDecl::named("templates", NodeType::List),
    ];
}

impl Node for PagesSection {
    const NODE: &'static str = "PagesSection";

    fn properties() -> Vec<PropDecl> {
        property_table(&[
            Self::OWN,
            ModelsSection::PROPERTIES,
            SectionBase::PROPERTIES,
        ])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        Ok(Self {
            status: props.take("status")?,
            templates: props.take("templates")?,
            models: ModelsSection::construct(props, Self::TYPE)?,
        })
    }
}

impl Section for PagesSection {
    fn base(&self) -> &SectionBase {
        &self.models.base
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let status = self.status.clone().unwrap_or_else(|| "all".into());
        extend(
            self.models.render(ctx),
            [
                ("status", status.into()),
                ("templates", self.templates.clone().into()),
            ],
        )
    }
}
