use serde_json::{Map, Value};

use super::{Section, SectionBase};
use crate::blueprint::{
    enum_property, BlueprintResult, Node, NodeI18n, NodeKirbytext, NodeProperty, NodeText, NodeType,
    PropDecl, Property, Props,
};
use crate::field::{extend, property_table};
use crate::render::RenderContext;

enum_property! {
    /// Color scheme of an info box
    InfoSectionTheme {
        Info => "info",
        Negative => "negative",
        Notice => "notice",
        Positive => "positive",
        Passive => "passive",
    }
}

/// Section that only shows information
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySection {
    pub base: SectionBase,
    pub help: Option<NodeText>,
    pub label: Option<NodeI18n>,
}

impl DisplaySection {
    pub const PROPERTIES: &'static [PropDecl] = &[
        PropDecl::named("help", NodeType::Text),
        PropDecl::named("label", NodeType::I18n),
    ];

    pub fn construct(props: &mut Props, section_type: &'static str) -> BlueprintResult<Self> {
        Ok(Self {
            help: props.take("help")?,
            label: props.take("label")?,
            base: SectionBase::construct(props, section_type)?,
        })
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let help = self.help.as_ref().and_then(|h| h.render(ctx));
        let label = self.label.as_ref().and_then(|l| l.render(ctx));
        extend(
            self.base.render(),
            [("help", help.into()), ("label", label.into())],
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoSection {
    pub display: DisplaySection,
    pub text: Option<NodeKirbytext>,
    pub theme: Option<InfoSectionTheme>,
}

impl InfoSection {
    pub const TYPE: &'static str = "info";

    const OWN: &'static [PropDecl] = &[
        PropDecl::named("text", NodeType::Kirbytext),
        PropDecl::named("theme", NodeType::Theme),
    ];
}

impl Node for InfoSection {
    const NODE: &'static str = "InfoSection";

    fn properties() -> Vec<PropDecl> {
        property_table(&[
            Self::OWN,
            DisplaySection::PROPERTIES,
            SectionBase::PROPERTIES,
        ])
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        Ok(Self {
            text: props.take("text")?,
            theme: props.take("theme")?,
            display: DisplaySection::construct(props, Self::TYPE)?,
        })
    }
}

impl Section for InfoSection {
    fn base(&self) -> &SectionBase {
        &self.display.base
    }

    fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let text = self.text.as_ref().and_then(|t| t.render(ctx));
        let theme = self.theme.as_ref().map_or(Value::Null, Property::value);
        extend(
            self.display.render(ctx),
            [("text", text.into()), ("theme", theme)],
        )
    }
}
