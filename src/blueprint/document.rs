//! Blueprint documents
//!
//! A blueprint describes one model: its title, options, preview and the
//! tab/column/section layout of its Panel view. Documents can skip levels
//! of the layout; `columns`, `sections` and `fields` at the top level are
//! wrapped into a single `main` tab.

use serde_json::{Map, Value};

use super::error::{BlueprintError, BlueprintResult};
use super::factory::{Factory, NodeType, Prop, PropDecl, Props};
use super::{Accept, BlueprintImage, ModelOptions, NodeI18n, NodeProperty, NodeUrl};
use crate::field::{Field, ValueError};
use crate::model::ModelKind;
use crate::render::RenderContext;
use crate::section::{section_from, Section};

/// Name of the tab wrapping shorthand layouts
pub const MAIN_TAB: &str = "main";

/// Width of a column without explicit width
pub const FULL_WIDTH: &str = "1/1";

const PROPERTIES: &[PropDecl] = &[
    PropDecl::named("title", NodeType::I18n),
    PropDecl::named("icon", NodeType::String),
    PropDecl::named("options", NodeType::Mixed),
    PropDecl::named("preview", NodeType::Url),
    PropDecl::named("image", NodeType::Image),
    PropDecl::named("accept", NodeType::Accept),
    PropDecl::named("tabs", NodeType::Mixed),
    PropDecl::named("columns", NodeType::Mixed),
    PropDecl::named("sections", NodeType::Mixed),
    PropDecl::named("fields", NodeType::Mixed),
    PropDecl::named("num", NodeType::Mixed),
    PropDecl::named("status", NodeType::Mixed),
];

#[derive(Debug)]
pub struct Blueprint {
    pub id: String,
    pub kind: ModelKind,
    pub name: String,
    pub title: NodeI18n,
    pub icon: Option<String>,
    pub options: ModelOptions,
    pub preview: Option<NodeUrl>,
    pub image: Option<BlueprintImage>,
    pub accept: Option<Accept>,
    pub num: Option<Value>,
    pub status: Option<Value>,
    pub tabs: Vec<Tab>,
}

impl Blueprint {
    /// Blueprint id: `site`, or `<kind>s/<name>`
    pub fn id_for(kind: ModelKind, name: &str) -> String {
        match kind {
            ModelKind::Site => "site".to_string(),
            ModelKind::Page => format!("pages/{name}"),
            ModelKind::File => format!("files/{name}"),
            ModelKind::User => format!("users/{name}"),
        }
    }

    /// Blueprint without layout, used when none is registered
    pub fn default_for(kind: ModelKind, name: &str) -> Self {
        Self {
            id: Self::id_for(kind, name),
            kind,
            name: name.to_string(),
            title: NodeI18n::wildcard(default_title(kind, name)),
            icon: None,
            options: ModelOptions::default_for(kind),
            preview: matches!(kind, ModelKind::Site | ModelKind::Page).then(NodeUrl::default),
            image: None,
            accept: (kind == ModelKind::File).then(Accept::default),
            num: None,
            status: None,
            tabs: Vec::new(),
        }
    }

    pub fn factory(kind: ModelKind, name: &str, document: Value) -> BlueprintResult<Self> {
        let raw = match document {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            _ => return Err(BlueprintError::invalid("Blueprint", "document must be a map")),
        };

        let mut props = Factory::for_properties(
            "Blueprint",
            PROPERTIES,
            raw.into_iter().map(|(k, v)| (k, Prop::Raw(v))),
        )?;

        let mut blueprint = Self::default_for(kind, name);
        if let Some(title) = props.take("title")? {
            blueprint.title = title;
        }
        blueprint.icon = props.take("icon")?;
        let options = props.take::<Value>("options")?.unwrap_or(Value::Null);
        blueprint.options = ModelOptions::factory(kind, options)?;
        if let Some(preview) = props.take::<NodeUrl>("preview")? {
            blueprint.preview = Some(preview);
        }
        blueprint.image = props.take("image")?;
        if let Some(accept) = props.take::<Accept>("accept")? {
            if kind != ModelKind::File {
                let message = format!("{kind} blueprints cannot define accept");
                return Err(BlueprintError::invalid("Blueprint", message));
            }
            blueprint.accept = Some(accept);
        }
        blueprint.num = props.take("num")?;
        blueprint.status = props.take("status")?;
        blueprint.tabs = tabs_from(normalize_layout(&mut props)?)?;

        tracing::debug!(id = %blueprint.id, tabs = blueprint.tabs.len(), "blueprint built");
        Ok(blueprint)
    }

    pub fn tab(&self, name: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.name == name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &dyn Section> {
        self.tabs
            .iter()
            .flat_map(|t| t.columns.iter())
            .flat_map(|c| c.sections.iter().map(|s| s.as_ref()))
    }

    pub fn fields(&self) -> impl Iterator<Item = &dyn Field> {
        self.sections()
            .flat_map(|s| s.fields().iter().map(|f| f.as_ref()))
    }

    pub fn field(&self, id: &str) -> Option<&dyn Field> {
        self.fields().find(|f| f.id() == id)
    }

    /// Validate content against every field, collecting the failures by field id
    pub fn validate(&self, content: &Map<String, Value>) -> Vec<(String, ValueError)> {
        self.fields()
            .filter_map(|field| {
                let value = content.get(field.id()).unwrap_or(&Value::Null);
                field
                    .validate(value)
                    .err()
                    .map(|e| (field.id().to_string(), e))
            })
            .collect()
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let mut blueprint = Map::new();
        blueprint.insert("id".into(), self.id.clone().into());
        blueprint.insert("type".into(), self.kind.as_str().into());
        blueprint.insert("name".into(), self.name.clone().into());
        blueprint.insert("title".into(), self.title.render(ctx).into());
        blueprint.insert("icon".into(), self.icon.clone().into());
        blueprint.insert("options".into(), Value::Object(self.options.render()));
        blueprint.insert(
            "preview".into(),
            self.preview.as_ref().map_or(Value::Null, |p| p.render(ctx)),
        );
        blueprint.insert(
            "image".into(),
            self.image
                .as_ref()
                .map_or(Value::Null, |i| i.render_value(ctx)),
        );
        let tabs = self.tabs.iter().map(|t| Value::Object(t.render(ctx)));
        blueprint.insert("tabs".into(), Value::Array(tabs.collect()));
        blueprint
    }
}

fn default_title(kind: ModelKind, name: &str) -> String {
    let name = if kind == ModelKind::Site {
        "site"
    } else {
        name
    };
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolve the layout shorthands into a `tabs` value
fn normalize_layout(props: &mut Props) -> BlueprintResult<Value> {
    if let Some(tabs) = props.take::<Value>("tabs")? {
        return Ok(tabs);
    }

    let columns = shorthand_columns(
        props.take("columns")?,
        props.take("sections")?,
        props.take("fields")?,
    );
    let Some(columns) = columns else {
        return Ok(Value::Null);
    };

    let mut main = Map::new();
    main.insert("columns".into(), columns);
    let mut tabs = Map::new();
    tabs.insert(MAIN_TAB.into(), Value::Object(main));
    Ok(Value::Object(tabs))
}

/// `columns` as given, or one full-width column around `sections` or `fields`
fn shorthand_columns(
    columns: Option<Value>,
    sections: Option<Value>,
    fields: Option<Value>,
) -> Option<Value> {
    match (columns, sections, fields) {
        (Some(columns), _, _) => Some(columns),
        (None, Some(sections), _) => Some(Value::Array(vec![column_of(sections)])),
        (None, None, Some(fields)) => {
            let mut section = Map::new();
            section.insert("type".into(), "fields".into());
            section.insert("fields".into(), fields);
            let mut sections = Map::new();
            sections.insert("fields".into(), Value::Object(section));
            Some(Value::Array(vec![column_of(Value::Object(sections))]))
        }
        (None, None, None) => None,
    }
}

fn column_of(sections: Value) -> Value {
    let mut column = Map::new();
    column.insert("width".into(), FULL_WIDTH.into());
    column.insert("sections".into(), sections);
    Value::Object(column)
}

fn tabs_from(tabs: Value) -> BlueprintResult<Vec<Tab>> {
    match tabs {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => map
            .into_iter()
            .map(|(name, tab)| Tab::factory(name, tab))
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, tab)| {
                let name = tab
                    .get("name")
                    .and_then(Value::as_str)
                    .map_or_else(|| format!("tab-{i}"), str::to_string);
                Tab::factory(name, tab)
            })
            .collect(),
        _ => Err(BlueprintError::invalid("Blueprint", "tabs must be a map or a list")),
    }
}

/// One tab of a Panel view
#[derive(Debug)]
pub struct Tab {
    pub name: String,
    pub label: Option<NodeI18n>,
    pub icon: Option<String>,
    pub columns: Vec<Column>,
}

impl Tab {
    pub fn factory(name: String, tab: Value) -> BlueprintResult<Self> {
        let mut tab = match tab {
            Value::Null | Value::Bool(true) => Map::new(),
            Value::Object(map) => map,
            _ => {
                let message = format!("tab '{name}' must be a map");
                return Err(BlueprintError::invalid("Tab", message));
            }
        };
        tab.remove("name");

        let label = match tab.remove("label") {
            Some(label) => NodeI18n::factory(label)?,
            None => None,
        };
        let icon = match tab.remove("icon") {
            None | Some(Value::Null) => None,
            Some(Value::String(icon)) => Some(icon),
            Some(_) => return Err(BlueprintError::invalid_type("Tab", "icon", "string")),
        };

        let columns = shorthand_columns(
            tab.remove("columns"),
            tab.remove("sections"),
            tab.remove("fields"),
        )
        .unwrap_or(Value::Null);

        if let Some((unknown, _)) = tab.into_iter().next() {
            return Err(BlueprintError::UnknownProperty {
                node: "Tab",
                property: unknown,
            });
        }

        Ok(Self {
            columns: Column::list_from(&name, columns)?,
            name,
            label,
            icon,
        })
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let label = self
            .label
            .as_ref()
            .and_then(|l| l.render(ctx))
            .unwrap_or_else(|| default_title(ModelKind::Page, &self.name));

        let mut tab = Map::new();
        let columns = self.columns.iter().map(|c| Value::Object(c.render(ctx)));
        tab.insert("columns".into(), Value::Array(columns.collect()));
        tab.insert("icon".into(), self.icon.clone().into());
        tab.insert("label".into(), label.into());
        tab.insert("name".into(), self.name.clone().into());
        tab
    }
}

/// A column of sections inside a tab
#[derive(Debug)]
pub struct Column {
    pub id: String,
    pub width: String,
    pub sections: Vec<Box<dyn Section>>,
}

impl Column {
    /// Columns as a list (ids `<tab>-col-<n>`) or a map keyed by id
    pub fn list_from(tab: &str, columns: Value) -> BlueprintResult<Vec<Self>> {
        match columns {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, column)| Self::factory(format!("{tab}-col-{i}"), column))
                .collect(),
            Value::Object(map) => map
                .into_iter()
                .map(|(id, column)| Self::factory(id, column))
                .collect(),
            _ => Err(BlueprintError::invalid("Column", "columns must be a list or a map")),
        }
    }

    pub fn factory(id: String, column: Value) -> BlueprintResult<Self> {
        let mut column = match column {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            _ => {
                let message = format!("column '{id}' must be a map");
                return Err(BlueprintError::invalid("Column", message));
            }
        };

        let width = match column.remove("width") {
            None | Some(Value::Null) => FULL_WIDTH.to_string(),
            Some(Value::String(width)) => width,
            Some(_) => return Err(BlueprintError::invalid_type("Column", "width", "string")),
        };

        let sections = match column.remove("sections") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(sections)) => sections
                .into_iter()
                .map(|(id, section)| section_from(&id, section))
                .collect::<BlueprintResult<Vec<_>>>()?,
            Some(_) => return Err(BlueprintError::invalid_type("Column", "sections", "map")),
        };

        if let Some((unknown, _)) = column.into_iter().next() {
            return Err(BlueprintError::UnknownProperty {
                node: "Column",
                property: unknown,
            });
        }

        Ok(Self {
            id,
            width,
            sections,
        })
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Map<String, Value> {
        let sections = self
            .sections
            .iter()
            .map(|s| (s.id().to_string(), Value::Object(s.render(ctx))))
            .collect();

        let mut column = Map::new();
        column.insert("id".into(), self.id.clone().into());
        column.insert("sections".into(), Value::Object(sections));
        column.insert("width".into(), self.width.clone().into());
        column
    }
}

#[cfg(test)]
mod tests;
