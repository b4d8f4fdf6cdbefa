//! Image settings for sections, fields and Panel views

use serde_json::{Map, Value};

use super::error::BlueprintResult;
use super::factory::{Factory, Node, NodeType, PropDecl, Props};
use crate::model::FileRef;
use crate::render::RenderContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlueprintImage {
    pub back: Option<String>,
    pub color: Option<String>,
    pub cover: Option<bool>,
    pub disabled: Option<bool>,
    pub icon: Option<String>,
    pub query: Option<String>,
    pub ratio: Option<String>,
}

impl BlueprintImage {
    /// - `true` / `null`: default image, all settings unset
    /// - `false`: disabled image
    /// - string: image query
    /// - map: explicit settings
    pub fn factory(image: Value) -> BlueprintResult<Self> {
        match image {
            Value::Null | Value::Bool(true) => Ok(Self::default()),
            Value::Bool(false) => Ok(Self {
                disabled: Some(true),
                ..Self::default()
            }),
            Value::String(query) => Ok(Self {
                query: Some(query),
                ..Self::default()
            }),
            Value::Object(settings) => Factory::make(settings),
            other => Factory::make(Map::from_iter([("query".to_string(), other)])),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled == Some(true)
    }

    /// Resolve the query to a file
    pub fn file(&self, ctx: &RenderContext<'_>) -> Option<FileRef> {
        self.query.as_deref().and_then(|q| ctx.model.query_file(q))
    }

    /// `None` is the "off" sentinel for a disabled image.
    pub fn render(&self, ctx: &RenderContext<'_>) -> Option<Map<String, Value>> {
        if self.is_disabled() {
            return None;
        }

        let mut image = Map::new();
        image.insert("back".into(), self.back.clone().into());
        image.insert("color".into(), self.color.clone().into());
        image.insert("cover".into(), self.cover.into());
        image.insert("icon".into(), self.icon.clone().into());
        image.insert("src".into(), self.file(ctx).map(|f| f.url).into());
        image.insert("ratio".into(), self.ratio.clone().into());
        Some(image)
    }

    /// Rendered image, or `false` when disabled
    pub fn render_value(&self, ctx: &RenderContext<'_>) -> Value {
        self.render(ctx).map_or(Value::Bool(false), Value::Object)
    }

    /// Take every setting of `image` that is set, keep the rest.
    pub fn merge(mut self, image: Option<&BlueprintImage>) -> Self {
        let Some(image) = image else {
            return self;
        };

        self.back = image.back.clone().or(self.back);
        self.color = image.color.clone().or(self.color);
        self.cover = image.cover.or(self.cover);
        self.disabled = image.disabled.or(self.disabled);
        self.icon = image.icon.clone().or(self.icon);
        self.query = image.query.clone().or(self.query);
        self.ratio = image.ratio.clone().or(self.ratio);
        self
    }
}

impl Node for BlueprintImage {
    const NODE: &'static str = "BlueprintImage";

    fn properties() -> Vec<PropDecl> {
        vec![
            PropDecl::named("back", NodeType::String),
            PropDecl::named("color", NodeType::String),
            PropDecl::named("cover", NodeType::Bool),
            PropDecl::named("disabled", NodeType::Bool),
            PropDecl::named("icon", NodeType::String),
            PropDecl::named("query", NodeType::String),
            PropDecl::named("ratio", NodeType::String),
        ]
    }

    fn construct(props: &mut Props) -> BlueprintResult<Self> {
        Ok(Self {
            back: props.take("back")?,
            color: props.take("color")?,
            cover: props.take("cover")?,
            disabled: props.take("disabled")?,
            icon: props.take("icon")?,
            query: props.take("query")?,
            ratio: props.take("ratio")?,
        })
    }
}
